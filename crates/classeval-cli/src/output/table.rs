use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_scalars, format_value, record_arrays, records_to_rows};

/// Format output as tables: scalar fields first, then one table per list
/// of records (ROC points, threshold metrics, calibration groups).
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_tables(result);
                print_envelope_notes(map);
            } else {
                print_result_tables(value);
            }
        }
        _ => {
            println!("{}", format_value(value));
        }
    }
}

fn print_result_tables(result: &Value) {
    let mut rows = Vec::new();
    flatten_scalars("", result, &mut rows);
    if !rows.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &rows {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    let mut arrays = Vec::new();
    record_arrays("", result, &mut arrays);
    for (name, arr) in arrays {
        let (headers, body) = records_to_rows(arr);
        let mut builder = Builder::default();
        builder.push_record(headers);
        for row in body {
            builder.push_record(row);
        }
        println!("\n{}:", name);
        println!("{}", Table::from(builder));
    }
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
