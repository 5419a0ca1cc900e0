//! CSV reading and column type inference.
//!
//! Rules:
//!
//! - CSV must have a header row; header names become column names.
//! - Every record must have the same number of fields as the header.
//! - Each column's [`DataType`] is inferred from its values: all non-empty
//!   values parse as `i64` -> [`DataType::Int64`], else all parse as `f64`
//!   -> [`DataType::Float64`], else [`DataType::Utf8`]. Empty cells become
//!   [`Value::Null`].
//!
//! Dates are not inferred here; date-typed columns arrive as text and are
//! coerced by [`crate::validate::check_dtypes`].

use std::path::Path;

use crate::error::{EtlError, EtlResult};
use crate::types::{Column, DataType, Table, Value};

/// Read a CSV file into an in-memory [`Table`] named `name`.
pub fn read_table_from_path(path: impl AsRef<Path>, name: &str) -> EtlResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(classify_csv_error)?;
    read_table_from_reader(&mut rdr, name)
}

/// Read CSV data from an existing CSV reader.
pub fn read_table_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    name: &str,
) -> EtlResult<Table> {
    let headers = rdr.headers().map_err(classify_csv_error)?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(EtlError::SourceEmpty);
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result.map_err(classify_csv_error)?);
    }

    let columns = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| build_column(header.trim(), idx, &records))
        .collect();

    Ok(Table::new(name, columns))
}

fn build_column(name: &str, idx: usize, records: &[csv::StringRecord]) -> Column {
    let raw: Vec<&str> = records.iter().map(|r| r.get(idx).unwrap_or("")).collect();
    let data_type = infer_dtype(&raw);
    let values = raw.iter().map(|s| parse_inferred(s, &data_type)).collect();
    Column::new(name, data_type, values)
}

fn infer_dtype(raw: &[&str]) -> DataType {
    let mut saw_value = false;
    let mut all_int = true;
    let mut all_float = true;

    for s in raw {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            continue;
        }
        saw_value = true;
        all_int = all_int && trimmed.parse::<i64>().is_ok();
        all_float = all_float && trimmed.parse::<f64>().is_ok();
    }

    if !saw_value {
        // Column of only empty cells; there is nothing to type.
        DataType::Utf8
    } else if all_int {
        DataType::Int64
    } else if all_float {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

fn parse_inferred(raw: &str, data_type: &DataType) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    match data_type {
        DataType::Int64 => trimmed.parse().map(Value::Int64).unwrap_or(Value::Null),
        DataType::Float64 => trimmed.parse().map(Value::Float64).unwrap_or(Value::Null),
        DataType::Utf8 | DataType::Date => Value::Utf8(trimmed.to_owned()),
    }
}

fn classify_csv_error(err: csv::Error) -> EtlError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            EtlError::SourceMissing
        }
        csv::ErrorKind::Io(io) => EtlError::SourceUnexpected(io),
        kind => EtlError::SourceMalformed {
            message: describe_kind(&kind),
        },
    }
}

fn describe_kind(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("record has {len} fields, expected {expected_len}"),
        csv::ErrorKind::Utf8 { .. } => "record contains invalid utf-8".to_string(),
        other => format!("{other:?}"),
    }
}
