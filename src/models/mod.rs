pub mod audit;
pub mod geo;
pub mod organization;
pub mod overtime;
pub mod punch;
pub mod punch_kind;
pub mod status;
pub mod worker;
