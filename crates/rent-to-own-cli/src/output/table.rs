use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, is_row_set};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result_tables(result, map),
            _ => println!("{}", field_table(map)),
        },
        Value::Array(rows) => println!("{}", row_table(rows)),
        other => println!("{}", other),
    }
}

fn print_result_tables(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(_, v)| !is_row_set(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    println!("{}", field_table(&scalars));

    for (key, val) in result.iter().filter(|(_, v)| is_row_set(v)) {
        if let Value::Array(rows) = val {
            println!("\n{}:", key);
            println!("{}", row_table(rows));
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &cell(val)]);
    }
    builder.build()
}

fn row_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    match rows.first() {
        Some(Value::Object(first)) => {
            let headers: Vec<String> = first.keys().cloned().collect();
            builder.push_record(headers.clone());
            for item in rows {
                if let Value::Object(map) = item {
                    let row: Vec<String> = headers
                        .iter()
                        .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default())
                        .collect();
                    builder.push_record(row);
                }
            }
        }
        _ => {
            for item in rows {
                builder.push_record([cell(item)]);
            }
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_table_has_header_and_rows() {
        let rows = json!([
            {"name": "Inventory", "value": "8"},
            {"name": "Population", "value": "6.3"}
        ]);
        let rendered = row_table(rows.as_array().unwrap()).to_string();
        assert!(rendered.contains("name"));
        assert!(rendered.contains("Inventory"));
        assert!(rendered.contains("6.3"));
    }

    #[test]
    fn test_field_table_renders_scalars() {
        let map = json!({"loan_amount": "280000", "passes_stress_test": false});
        let rendered = field_table(map.as_object().unwrap()).to_string();
        assert!(rendered.contains("loan_amount"));
        assert!(rendered.contains("false"));
    }
}
