//! CSV export of extraction records
//!
//! Columns are the canonical form fields followed by any other key seen in any
//! record, in first-seen order. A record missing a column gets an empty cell.

use serde_json::Value;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::ai::extraction::types::{ExtractionRecord, CANONICAL_FIELDS};
use crate::error::{ForminatorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { rows: usize },
    /// No records, no file was created
    NothingToWrite,
    /// Target exists and overwriting was not allowed
    AlreadyExists,
}

/// Canonical fields, then extra keys across all records
pub fn derive_columns(records: &[ExtractionRecord]) -> Vec<String> {
    let mut columns: Vec<String> = CANONICAL_FIELDS.iter().map(|f| f.to_string()).collect();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Render a JSON value as cell text
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Quote a field if it contains a delimiter, quote or line break
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_row<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")
}

/// Write a header row and one row per record
pub fn write_csv<W: Write>(writer: &mut W, records: &[ExtractionRecord]) -> io::Result<()> {
    let columns = derive_columns(records);
    write_row(writer, &columns)?;

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|c| record.get(c).map(format_cell).unwrap_or_default())
            .collect();
        write_row(writer, &row)?;
    }
    writer.flush()
}

/// Write `records` to `path`
///
/// Nothing is written for an empty result set, and an existing file is left
/// alone unless `overwrite` is set.
pub fn export_csv(
    path: &Path,
    records: &[ExtractionRecord],
    overwrite: bool,
) -> Result<ExportOutcome> {
    if records.is_empty() {
        return Ok(ExportOutcome::NothingToWrite);
    }
    if path.exists() && !overwrite {
        tracing::warn!("Refusing to overwrite {}", path.display());
        return Ok(ExportOutcome::AlreadyExists);
    }

    let export_error = |source| ForminatorError::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(export_error)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, records).map_err(export_error)?;

    tracing::info!("Results written to {}", path.display());
    Ok(ExportOutcome::Written {
        rows: records.len(),
    })
}
