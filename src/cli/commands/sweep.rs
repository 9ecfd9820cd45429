use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sweep::SweepLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{parse_date, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sweep { org, date } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let day = match date {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => today(),
        };

        SweepLogic::run(&mut pool, &cfg.org_for(org), day)?;
    }

    Ok(())
}
