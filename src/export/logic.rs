// src/export/logic.rs

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::punches::{load_all_org_punches, load_org_punches_in_span, load_punches_in_span};
use crate::db::workers::load_workers_for_org;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::PunchExport;
use crate::ui::messages::warning;
use crate::utils::date::{local_span_utc, period_bounds};

use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export punch records of an organization.
    ///
    /// - `format`: csv | json | xlsx | pdf
    /// - `file`: absolute path of the output file
    /// - `period`: `None` for everything, otherwise "YYYY", "YYYY-MM",
    ///   "YYYY-MM-DD" or "START:END" in local calendar days
    /// - `worker`: restrict the export to one worker
    pub fn export(
        pool: &DbPool,
        org_id: &str,
        format: ExportFormat,
        file: &str,
        period: &Option<String>,
        worker: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let punches = load_selection(pool, org_id, period, worker)?;

        if punches.is_empty() {
            warning("No punches found for the selected period.");
            return Ok(());
        }

        // Resolve display names once for the whole batch
        let names: HashMap<String, String> = load_workers_for_org(&pool.conn, org_id)?
            .into_iter()
            .map(|w| (w.id, w.display_name))
            .collect();

        let rows: Vec<PunchExport> = punches
            .iter()
            .map(|p| {
                let name = names.get(&p.worker_id).map(String::as_str).unwrap_or("");
                PunchExport::from_punch(p, name)
            })
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
            ExportFormat::Pdf => {
                let title = build_pdf_title(org_id, period);
                export_pdf(&rows, path, &title)?
            }
        }

        let _ = ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "Exported {} punch(es) as {}",
                rows.len(),
                format.as_str()
            ),
        );

        Ok(())
    }
}

/// Title line rendered on every PDF page.
fn build_pdf_title(org_id: &str, period: &Option<String>) -> String {
    match period {
        None => format!("Punch records for '{org_id}'"),
        Some(p) => format!("Punch records for '{org_id}' ({p})"),
    }
}

fn load_selection(
    pool: &DbPool,
    org_id: &str,
    period: &Option<String>,
    worker: &Option<String>,
) -> AppResult<Vec<crate::models::punch::Punch>> {
    let conn = &pool.conn;

    match (period, worker) {
        (None, None) => load_all_org_punches(conn, org_id),
        (None, Some(w)) => {
            let mut all = load_all_org_punches(conn, org_id)?;
            all.retain(|p| &p.worker_id == w);
            Ok(all)
        }
        (Some(p), w) => {
            let (first, last) = period_bounds(p)?;
            let (start, end) = local_span_utc(first, last)?;

            match w {
                Some(w) => load_punches_in_span(conn, org_id, w, &start, &end),
                None => load_org_punches_in_span(conn, org_id, &start, &end),
            }
        }
    }
}
