pub mod initialize;
pub mod log;
pub mod migrate;
pub mod orgs;
pub mod overtime;
pub mod pool;
pub mod punches;
pub mod stats;
pub mod workers;
