use serde_json::Value;

use super::scalar_text;

/// Headline field for each kind of result, in priority order.
const PRIORITY_KEYS: [&str; 10] = [
    "monthly_cost_of_ownership",
    "total",
    "cash_to_close",
    "total_closing_costs",
    "percent_complete",
    "level",
    "current_streak_days",
    "imported",
    "file",
    "id",
];

/// Print just the key answer value from the output.
///
/// Looks inside the `result` envelope when there is one, then walks the
/// priority list before falling back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                    println!("{}", scalar_text(val));
                    return;
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{key}: {}", scalar_text(val));
            }
        }
        // Lists print one id (or value) per line
        Value::Array(items) => {
            for item in items {
                match item.get("id") {
                    Some(id) => println!("{}", scalar_text(id)),
                    None => println!("{}", scalar_text(item)),
                }
            }
        }
        other => println!("{}", scalar_text(other)),
    }
}
