use serde_json::Value;

use super::format_value;

/// Headline statistics by dotted path, most important first.
const PRIORITY_PATHS: [&str; 4] = [
    "area_under_curve",
    "discrimination.area_under_curve",
    "goodness_of_fit.p_value",
    "calibration_errors.expected_calibration_error",
];

/// Print just the key answer value from the output.
///
/// Looks for the headline statistic of each command, then falls back to
/// the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(val) = PRIORITY_PATHS
        .iter()
        .filter_map(|path| lookup(result_obj, path))
        .find(|v| !v.is_null())
    {
        println!("{}", format_value(val));
        return;
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested() {
        let v = json!({ "goodness_of_fit": { "p_value": 0.42 } });
        assert_eq!(lookup(&v, "goodness_of_fit.p_value"), Some(&json!(0.42)));
        assert_eq!(lookup(&v, "area_under_curve"), None);
    }
}
