use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::capture::SystemClock;
use crate::core::status::StatusLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status {
        worker,
        team,
        org,
        watch,
        coarse,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *team {
            return StatusLogic::print_team(&pool, &cfg.org_for(org), &SystemClock);
        }

        let worker_id = cfg.worker_for(worker)?;
        if *watch {
            StatusLogic::watch(&pool, &worker_id, *coarse)
        } else {
            StatusLogic::print_single(&pool, &worker_id, &SystemClock, *coarse)
        }
    } else {
        Ok(())
    }
}
