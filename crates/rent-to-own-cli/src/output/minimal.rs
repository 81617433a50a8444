use serde_json::Value;

use super::cell;

/// Headline field per command, in priority order.
const PRIORITY_KEYS: [&str; 5] = [
    "qualification_score",
    "valid",
    "fastest_to_down_payment",
    "opportunity_rating",
    "time_to_down_payment_months",
];

/// Print just the headline answer from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    return minimal_value(val);
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, minimal_value(val));
        }
    }

    minimal_value(result_obj)
}

fn minimal_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        other => cell(other),
    }
}
