use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::punches::{load_punches_in_span, load_recent_punches};
use crate::db::workers::load_worker;
use crate::errors::AppResult;
use crate::models::punch::Punch;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, colorize_optional};
use crate::utils::date::{local_span_utc, period_bounds};
use crate::utils::formatting::describe_kind;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        worker,
        period,
        limit,
    } = cmd
    {
        let worker_id = cfg.worker_for(worker)?;
        let pool = DbPool::new(&cfg.database)?;
        let w = load_worker(&pool.conn, &worker_id)?;

        // A period lists chronologically; without one the latest punches
        // come first, like the status view.
        let punches = match period {
            Some(p) => {
                let (first, last) = period_bounds(p)?;
                let (start, end) = local_span_utc(first, last)?;
                load_punches_in_span(&pool.conn, &w.org_id, &w.id, &start, &end)?
            }
            None => load_recent_punches(&pool.conn, &w.org_id, &w.id, *limit)?,
        };

        if punches.is_empty() {
            info(format!("No punches recorded for '{}'.", w.id));
            return Ok(());
        }

        print_punches(&punches);
        println!("{} punch(es)", punches.len());
    }

    Ok(())
}

fn print_punches(punches: &[Punch]) {
    let mut table = Table::new(vec![
        Column::new("Id", 5),
        Column::new("Time", 19),
        Column::new("Kind", 12),
        Column::new("Auto", 4),
        Column::new("Device", 14),
        Column::new("Comment", 24),
        Column::new("Edits", 5),
    ]);

    for p in punches {
        let (label, color) = describe_kind(p.kind);

        table.add_row(vec![
            p.id.to_string(),
            p.local_time_str(),
            format!("{}{}{}", color, label, RESET),
            colorize_optional(if p.auto_clock_out { "yes" } else { "-" }),
            p.device.clone(),
            colorize_optional(p.comment.as_deref().unwrap_or("-")),
            colorize_optional(&if p.edit_count() > 0 {
                p.edit_count().to_string()
            } else {
                "-".to_string()
            }),
        ]);
    }

    println!("{}", table.render());
}
