//! CSV formatting module
//!
//! Use [`to_csv`] unless you need to write the CSV to a file or other writer.
use crate::Record;
use std::io::Write;

/// The header row, in the column order of [`Record::fields`].
pub const HEADER: [&str; 5] = [
    "URL",
    "Last Modified",
    "Change Frequency",
    "Priority",
    "Alternates",
];

/// Formats records as CSV: the header row, then one row per record.
///
/// Record fields are each wrapped in double quotes, header names are not.
/// Rows are separated by `\n` with no trailing newline, so an empty slice yields just the header.
///
/// # Example
/// ```rust
/// use sitemap_csv::{Record, to_csv};
///
/// let record = Record {
///     url: "https://a.com/".to_string(),
///     priority: "0.5".to_string(),
///     ..Record::default()
/// };
///
/// assert_eq!(
///     to_csv(&[record]),
///     "URL,Last Modified,Change Frequency,Priority,Alternates\n\"https://a.com/\",\"\",\"\",\"0.5\",\"\""
/// );
/// ```
#[must_use]
pub fn to_csv(records: &[Record]) -> String {
    let mut csv = HEADER.join(",");
    for record in records {
        csv.push('\n');
        push_row(&mut csv, record);
    }
    csv
}

/// Write the same text as [`to_csv`] using the given writer.
///
/// # Errors
/// This function will return an error if the writer fails.
pub fn write_csv<W: Write>(writer: &mut W, records: &[Record]) -> std::io::Result<()> {
    writer.write_all(HEADER.join(",").as_bytes())?;

    let mut row = String::new();
    for record in records {
        row.clear();
        row.push('\n');
        push_row(&mut row, record);
        writer.write_all(row.as_bytes())?;
    }
    Ok(())
}

fn push_row(out: &mut String, record: &Record) {
    for (i, field) in record.fields().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_quoted(out, field);
    }
}

/// Embedded quotes are doubled, so commas, quotes and newlines survive a round trip.
fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}
