use crate::cli::parser::WorkerAction;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::{orgs, workers};
use crate::errors::AppResult;
use crate::models::worker::{PunchSettings, Worker};
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};
use chrono::Local;

pub fn handle(action: &WorkerAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        WorkerAction::Add {
            id,
            org,
            name,
            role,
            mobile,
            no_gps,
            exempt,
        } => {
            let org_id = cfg.org_for(org);

            // The organization must exist before workers join it
            orgs::load_org(&pool.conn, &org_id)?;

            let worker = Worker {
                id: id.clone(),
                org_id: org_id.clone(),
                display_name: name.clone().unwrap_or_else(|| id.clone()),
                role: role.to_role(),
                settings: PunchSettings {
                    allow_mobile: *mobile,
                    track_gps: !*no_gps,
                    exempt_from_auto_clock_out: *exempt,
                },
                created_at: Local::now().to_rfc3339(),
            };

            workers::insert_worker(&pool.conn, &worker)?;

            let _ = ttlog(
                &pool.conn,
                "worker",
                &format!("worker {}", worker.id),
                &format!("Worker '{}' joined '{}'", worker.display_name, org_id),
            );

            success(format!(
                "Worker '{}' registered in '{}'.",
                worker.id, org_id
            ));
        }

        WorkerAction::Set {
            id,
            name,
            role,
            mobile,
            no_mobile,
            gps,
            no_gps,
            exempt,
            no_exempt,
        } => {
            let mut worker = workers::load_worker(&pool.conn, id)?;

            if let Some(n) = name {
                worker.display_name = n.clone();
            }
            if let Some(r) = role {
                worker.role = r.to_role();
            }
            if *mobile {
                worker.settings.allow_mobile = true;
            }
            if *no_mobile {
                worker.settings.allow_mobile = false;
            }
            if *gps {
                worker.settings.track_gps = true;
            }
            if *no_gps {
                worker.settings.track_gps = false;
            }
            if *exempt {
                worker.settings.exempt_from_auto_clock_out = true;
            }
            if *no_exempt {
                worker.settings.exempt_from_auto_clock_out = false;
            }

            workers::update_worker(&pool.conn, &worker)?;

            let _ = ttlog(
                &pool.conn,
                "worker",
                &format!("worker {}", worker.id),
                "Worker settings updated",
            );

            success(format!("Worker '{}' updated.", worker.id));
        }

        WorkerAction::List { org } => {
            let org_id = cfg.org_for(org);
            let all = workers::load_workers_for_org(&pool.conn, &org_id)?;

            if all.is_empty() {
                info(format!("No workers registered in '{}'.", org_id));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("Worker", 12),
                Column::new("Name", 20),
                Column::new("Role", 11),
                Column::new("Mobile", 7),
                Column::new("GPS", 5),
                Column::new("Exempt", 7),
            ]);

            for w in &all {
                table.add_row(vec![
                    w.id.clone(),
                    w.display_name.clone(),
                    w.role.to_db_str().to_string(),
                    yes_no(w.settings.allow_mobile),
                    yes_no(w.settings.track_gps),
                    yes_no(w.is_exempt()),
                ]);
            }

            println!("{}", table.render());
        }
    }

    Ok(())
}

fn yes_no(v: bool) -> String {
    if v { "yes".to_string() } else { "no".to_string() }
}
