// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, punches_to_table};
use crate::export::pdf::PdfTable;
use crate::export::{PunchExport, notify_export_success};
use crate::ui::messages::info;
use std::io;
use std::path::Path;

/// PDF export rendered through the table writer.
pub(crate) fn export_pdf(punches: &[PunchExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let data_vec = punches_to_table(punches);

    let mut pdf = PdfTable::new();
    pdf.write_table(title, &headers, &data_vec);

    pdf.save(path)
        .map_err(|e| AppError::from(io::Error::other(format!("PDF export error: {e}"))))?;

    notify_export_success("PDF", path);
    Ok(())
}
