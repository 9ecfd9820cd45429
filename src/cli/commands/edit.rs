use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::capture::SystemClock;
use crate::core::punch::PunchLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::time::parse_local_input;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        punch_id,
        time,
        reason,
        editor,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let new_time = parse_local_input(time)?;

        PunchLogic::edit_time(&mut pool, *punch_id, editor, new_time, reason, &SystemClock)?;
    }

    Ok(())
}
