use crate::cli::parser::OrgAction;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::orgs;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::organization::{AutoClockOutPolicy, Organization};
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_required_time;
use chrono::Local;

pub fn handle(action: &OrgAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        OrgAction::Add {
            id,
            name,
            photo_on_punch,
            gps,
            auto_out,
        } => {
            let policy = match auto_out {
                Some(t) => AutoClockOutPolicy {
                    enabled: true,
                    time: Some(parse_required_time(t)?),
                },
                None => AutoClockOutPolicy::disabled(),
            };

            let org = Organization {
                id: id.clone(),
                name: name.clone().unwrap_or_else(|| id.clone()),
                photo_on_punch: *photo_on_punch,
                gps_tracking: *gps,
                auto_clock_out: policy,
                created_at: Local::now().to_rfc3339(),
            };

            orgs::insert_org(&pool.conn, &org)?;

            let _ = ttlog(
                &pool.conn,
                "org",
                &format!("org {}", org.id),
                &format!("Organization '{}' registered", org.name),
            );

            success(format!("Organization '{}' registered.", org.id));
        }

        OrgAction::Set {
            id,
            name,
            photo_on_punch,
            no_photo_on_punch,
            gps,
            no_gps,
            auto_out,
            no_auto_out,
        } => {
            let mut org = orgs::load_org(&pool.conn, id)?;

            if let Some(n) = name {
                org.name = n.clone();
            }
            if *photo_on_punch {
                org.photo_on_punch = true;
            }
            if *no_photo_on_punch {
                org.photo_on_punch = false;
            }
            if *gps {
                org.gps_tracking = true;
            }
            if *no_gps {
                org.gps_tracking = false;
            }
            if let Some(t) = auto_out {
                org.auto_clock_out = AutoClockOutPolicy {
                    enabled: true,
                    time: Some(parse_required_time(t)?),
                };
            }
            if *no_auto_out {
                org.auto_clock_out = AutoClockOutPolicy::disabled();
            }

            orgs::update_org(&pool.conn, &org)?;

            let _ = ttlog(
                &pool.conn,
                "org",
                &format!("org {}", org.id),
                "Organization settings updated",
            );

            success(format!("Organization '{}' updated.", org.id));
        }

        OrgAction::Show { id } => {
            let org = orgs::load_org(&pool.conn, id)?;
            print_org(&org);
        }

        OrgAction::List => {
            let all = orgs::list_orgs(&pool.conn)?;

            if all.is_empty() {
                crate::ui::messages::info("No organizations registered yet.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("Org", 12),
                Column::new("Name", 20),
                Column::new("Photo", 6),
                Column::new("GPS", 5),
                Column::new("Auto Out", 9),
            ]);

            for org in &all {
                table.add_row(vec![
                    org.id.clone(),
                    org.name.clone(),
                    yes_no(org.photo_on_punch),
                    yes_no(org.gps_tracking),
                    org.auto_clock_out
                        .cutoff()
                        .map(|t| t.format("%H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string()),
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

fn print_org(org: &Organization) {
    println!("🏢 {} ({})", org.name, org.id);
    println!("   photo on clock-in : {}", yes_no(org.photo_on_punch));
    println!("   GPS tracking      : {}", yes_no(org.gps_tracking));
    match org.auto_clock_out.cutoff() {
        Some(t) => println!("   auto clock-out    : daily at {}", t.format("%H:%M")),
        None => println!("   auto clock-out    : disabled"),
    }
    println!("   created           : {}", org.created_at);
}
