//! Column dtype checking and best-effort coercion.

use chrono::NaiveDate;

use crate::error::EtlError;
use crate::observability::LogSink;
use crate::types::{DATE_FORMAT, DataType, Schema, Table, Value};

/// Check every schema field against `table`'s columns, coercing mismatched
/// columns to their expected dtype.
///
/// For each field, in schema order:
///
/// - column absent from the table: error line, field skipped;
/// - column dtype already matches: no action, no log line;
/// - dtype mismatch: warning line, then per-value coercion. Values that
///   cannot be converted become [`Value::Null`]; the row count never changes.
///   A successful conversion is confirmed with an info line; a structural
///   failure (the rebuilt column would not match the table's row count) is
///   logged as an error and leaves the column unmodified.
///
/// Takes the table by value and returns it; columns not listed in the schema
/// pass through untouched.
pub fn check_dtypes(mut table: Table, schema: &Schema, name: &str, sink: &dyn LogSink) -> Table {
    let expected_rows = table.row_count();

    for field in &schema.fields {
        let Some(idx) = table.column_index(&field.name) else {
            sink.error(&format!("Column '{}' not found in {name}", field.name));
            continue;
        };

        let column = &table.columns[idx];
        if column.data_type == field.data_type {
            continue;
        }

        sink.warn(&format!(
            "Column '{}' in {name} has dtype {}, expected {}. Attempting conversion",
            field.name, column.data_type, field.data_type
        ));

        let rebuilt = coerce_values(&column.values, &field.data_type);
        if rebuilt.len() != expected_rows {
            let err = EtlError::CoerceStructural {
                column: field.name.clone(),
                message: format!("rebuilt {} values for {expected_rows} rows", rebuilt.len()),
            };
            sink.error(&format!("Could not convert column in {name}: {err}"));
            continue;
        }

        let column = &mut table.columns[idx];
        column.values = rebuilt;
        column.data_type = field.data_type.clone();
        sink.info(&format!(
            "Column '{}' in {name} converted to {}",
            field.name, field.data_type
        ));
    }

    table
}

fn coerce_values(values: &[Value], target: &DataType) -> Vec<Value> {
    values.iter().map(|v| coerce_value(v, target)).collect()
}

/// Convert a single value to `target`, yielding [`Value::Null`] when the
/// value has no representation there. `Null` stays `Null` for every target.
fn coerce_value(value: &Value, target: &DataType) -> Value {
    if value.is_null() {
        return Value::Null;
    }

    match target {
        DataType::Utf8 => match value {
            Value::Utf8(s) => Value::Utf8(s.clone()),
            Value::Int64(i) => Value::Utf8(i.to_string()),
            Value::Float64(f) => Value::Utf8(f.to_string()),
            Value::Date(d) => Value::Utf8(d.format(DATE_FORMAT).to_string()),
            Value::Null => Value::Null,
        },
        DataType::Int64 => match value {
            Value::Int64(i) => Value::Int64(*i),
            Value::Float64(f) => float_to_int(*f),
            Value::Utf8(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<i64>() {
                    Ok(i) => Value::Int64(i),
                    Err(_) => trimmed.parse::<f64>().map_or(Value::Null, float_to_int),
                }
            }
            _ => Value::Null,
        },
        DataType::Float64 => match value {
            Value::Float64(f) => Value::Float64(*f),
            Value::Int64(i) => Value::Float64(*i as f64),
            Value::Utf8(s) => s.trim().parse().map(Value::Float64).unwrap_or(Value::Null),
            _ => Value::Null,
        },
        DataType::Date => match value {
            Value::Date(d) => Value::Date(*d),
            Value::Utf8(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .map(Value::Date)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        },
    }
}

// Integral floats convert exactly; anything fractional or non-finite has no
// int64 representation.
fn float_to_int(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 {
        Value::Int64(f as i64)
    } else {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_stays_null_for_every_target() {
        for target in [
            DataType::Int64,
            DataType::Float64,
            DataType::Utf8,
            DataType::Date,
        ] {
            assert_eq!(coerce_value(&Value::Null, &target), Value::Null);
        }
    }

    #[test]
    fn int_coercion_accepts_integral_floats() {
        assert_eq!(
            coerce_value(&Value::Utf8("42.0".to_string()), &DataType::Int64),
            Value::Int64(42)
        );
        assert_eq!(
            coerce_value(&Value::Float64(3.5), &DataType::Int64),
            Value::Null
        );
    }

    #[test]
    fn date_coercion_rejects_invalid_calendar_dates() {
        assert_eq!(
            coerce_value(&Value::Utf8("2024-02-30".to_string()), &DataType::Date),
            Value::Null
        );
        assert_eq!(
            coerce_value(&Value::Utf8("2024-02-29".to_string()), &DataType::Date),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn text_coercion_renders_dates_with_fixed_format() {
        let d = NaiveDate::from_ymd_opt(1990, 5, 12).unwrap();
        assert_eq!(
            coerce_value(&Value::Date(d), &DataType::Utf8),
            Value::Utf8("1990-05-12".to_string())
        );
    }
}
