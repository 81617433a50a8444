pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar for a single cell. Nested values fall back to compact JSON.
pub fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// True for a non-empty array whose first element is an object; such
/// fields are rendered as their own table rather than a single cell.
pub fn is_row_set(value: &Value) -> bool {
    matches!(value, Value::Array(rows) if matches!(rows.first(), Some(Value::Object(_))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_rendering() {
        assert_eq!(cell(&json!("1769.79")), "1769.79");
        assert_eq!(cell(&json!(140)), "140");
        assert_eq!(cell(&Value::Null), "");
        assert_eq!(cell(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_row_set_detection() {
        assert!(is_row_set(&json!([{"month": 1}])));
        assert!(!is_row_set(&json!([])));
        assert!(!is_row_set(&json!(["a", "b"])));
    }
}
