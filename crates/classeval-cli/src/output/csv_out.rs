use serde_json::Value;
use std::io;

use super::{flatten_scalars, record_arrays, records_to_rows};

/// Record lists preferred as the CSV body, in order.
const PRIMARY_RECORDS: [&str; 3] = ["groups", "threshold_metrics", "points"];

/// Write output as CSV to stdout.
///
/// Results holding lists of records (calibration groups, threshold
/// metrics) are written as one row per record; anything else as
/// `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let mut arrays = Vec::new();
    record_arrays("", result, &mut arrays);
    let primary = PRIMARY_RECORDS.iter().find_map(|wanted| {
        arrays.iter().find(|(name, _)| {
            name.as_str() == *wanted || name.ends_with(&format!(".{wanted}"))
        })
    });

    match primary {
        Some((_, arr)) => {
            let (headers, rows) = records_to_rows(arr);
            let _ = wtr.write_record(&headers);
            for row in rows {
                let _ = wtr.write_record(&row);
            }
        }
        None => {
            let mut rows = Vec::new();
            flatten_scalars("", result, &mut rows);
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in rows {
                let _ = wtr.write_record([key.as_str(), val.as_str()]);
            }
        }
    }

    let _ = wtr.flush();
}
