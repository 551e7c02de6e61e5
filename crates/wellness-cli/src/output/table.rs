use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::scalar_text;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_object("", map),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", scalar_text(value)),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object("", res_map),
        Value::Array(arr) => print_array_table(arr),
        other => println!("{}", scalar_text(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

/// Scalars go into one Field/Value table; nested objects and lists of
/// records get their own titled tables underneath.
fn print_object(title: &str, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(&str, &Value)> = Vec::new();
    let mut scalar_rows = 0usize;

    for (key, val) in map {
        let is_records = matches!(val, Value::Array(a) if a.iter().any(Value::is_object));
        if val.is_object() || is_records {
            nested.push((key.as_str(), val));
        } else {
            builder.push_record([key.clone(), scalar_text(val)]);
            scalar_rows += 1;
        }
    }

    if scalar_rows > 0 {
        if !title.is_empty() {
            println!("\n{title}");
        }
        println!("{}", Table::from(builder));
    }

    for (key, val) in nested {
        let heading = if title.is_empty() {
            key.to_string()
        } else {
            format!("{title}.{key}")
        };
        match val {
            Value::Object(inner) => print_object(&heading, inner),
            Value::Array(arr) => {
                println!("\n{heading}");
                print_array_table(arr);
            }
            _ => {}
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", scalar_text(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}
