//! Helpers for handing records to a user: the download file name, its MIME type, and a short preview.
use crate::{Record, csv::HEADER};
use chrono::{DateTime, Utc};

/// MIME type of the exported file.
pub const CSV_MIME_TYPE: &str = "text/csv; charset=utf-8";

/// Rows shown by [`preview`]; the export itself always has every row.
pub const PREVIEW_ROWS: usize = 100;

/// Name of the exported file: `sitemap-<unix millis>.csv`.
#[must_use]
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("sitemap-{}.csv", at.timestamp_millis())
}

/// The first [`PREVIEW_ROWS`] records.
#[must_use]
pub fn preview(records: &[Record]) -> &[Record] {
    &records[..records.len().min(PREVIEW_ROWS)]
}

/// Lays the [`preview`] rows out as a plain text table with aligned columns.
/// A final line notes how many rows were left out.
#[must_use]
pub fn render_preview(records: &[Record]) -> String {
    let rows = preview(records);

    let mut widths = HEADER.map(|h| h.chars().count());
    for record in rows {
        for (width, field) in widths.iter_mut().zip(record.fields()) {
            *width = (*width).max(field.chars().count());
        }
    }

    let mut table = String::new();
    push_line(&mut table, HEADER, &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_line(&mut table, rule.each_ref().map(String::as_str), &widths);
    for record in rows {
        push_line(&mut table, record.fields(), &widths);
    }

    let hidden = records.len() - rows.len();
    if hidden > 0 {
        table.push_str(&format!("... {hidden} more rows\n"));
    }
    table
}

fn push_line(out: &mut String, fields: [&str; 5], widths: &[usize; 5]) {
    let line = fields
        .iter()
        .zip(widths)
        .map(|(field, &width)| format!("{field:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
