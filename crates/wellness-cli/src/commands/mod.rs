pub mod emergency;
pub mod journal;
pub mod mortgage;
pub mod yoga;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// clap value parser for core enums that only derive serde.
pub(crate) fn parse_keyword<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let normalized = raw.trim().to_lowercase().replace('-', "_");
    serde_json::from_value(Value::String(normalized)).map_err(|_| format!("unrecognised value '{raw}'"))
}
