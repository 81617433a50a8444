use serde_json::Value;
use std::io;

use super::{cell, is_row_set};

/// Write output as CSV to stdout.
///
/// A result object becomes `field,value` rows; row-set fields (the equity
/// schedule, scenarios, market indicators) follow as their own blocks
/// separated by a blank line.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map.iter().filter(|(_, v)| !is_row_set(v)) {
                let _ = wtr.write_record([key.as_str(), &cell(val)]);
            }
            for (key, val) in map.iter().filter(|(_, v)| is_row_set(v)) {
                if let Value::Array(rows) = val {
                    let _ = wtr.write_record([""]);
                    let _ = wtr.write_record([key.as_str()]);
                    write_rows(&mut wtr, rows);
                }
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows),
        other => {
            let _ = wtr.write_record([&cell(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            let _ = wtr.write_record([&cell(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(cell).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
