pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;
use std::io::{self, Write};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print JSON to stdout.
fn print_json(value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match serde_json::to_writer_pretty(&mut out, value) {
        Ok(()) => {
            let _ = writeln!(out);
        }
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Scalar leaves of `value` as `(dotted.path, text)` rows. Nested objects
/// are descended into; arrays of objects are skipped (see [`record_arrays`]).
pub fn flatten_scalars(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_scalars(&join_path(prefix, key), val, rows);
            }
        }
        Value::Array(arr) if is_record_array(arr) => {}
        _ => rows.push((prefix.to_string(), format_value(value))),
    }
}

/// Every array of objects under `value`, keyed by dotted path.
pub fn record_arrays<'a>(prefix: &str, value: &'a Value, out: &mut Vec<(String, &'a [Value])>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                record_arrays(&join_path(prefix, key), val, out);
            }
        }
        Value::Array(arr) if is_record_array(arr) => {
            out.push((prefix.to_string(), arr.as_slice()));
        }
        _ => {}
    }
}

/// Column names and rows of an array of flat objects.
pub fn records_to_rows(arr: &[Value]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers: Vec<String> = match arr.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => return (Vec::new(), Vec::new()),
    };
    let rows = arr
        .iter()
        .filter_map(|item| item.as_object())
        .map(|map| {
            headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect()
        })
        .collect();
    (headers, rows)
}

/// Render one JSON value as a cell. Non-finite statistics arrive as `null`.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn is_record_array(arr: &[Value]) -> bool {
    matches!(arr.first(), Some(Value::Object(_)))
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "area_under_curve": 0.75,
            "hanley": { "standard_error": 0.1, "interval": { "lower": 0.55, "upper": 0.95 } },
            "delong": null,
            "points": [
                { "threshold": 0.9, "true_positive_rate": 0.5 },
                { "threshold": 0.4, "true_positive_rate": 1.0 }
            ]
        })
    }

    #[test]
    fn test_flatten_scalars_dotted_paths() {
        let mut rows = Vec::new();
        flatten_scalars("", &sample(), &mut rows);
        let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"area_under_curve"));
        assert!(keys.contains(&"hanley.interval.lower"));
        assert!(keys.contains(&"delong"));
        assert!(!keys.iter().any(|k| k.starts_with("points")));
    }

    #[test]
    fn test_record_arrays_found() {
        let v = sample();
        let mut arrays = Vec::new();
        record_arrays("", &v, &mut arrays);
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].0, "points");
        let (headers, rows) = records_to_rows(arrays[0].1);
        assert_eq!(headers.len(), 2);
        assert_eq!(rows.len(), 2);
    }
}
