use thiserror::Error;

#[derive(Debug, Error)]
pub enum WellnessError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for WellnessError {
    fn from(e: serde_json::Error) -> Self {
        WellnessError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for WellnessError {
    fn from(e: std::io::Error) -> Self {
        WellnessError::Storage(e.to_string())
    }
}

impl WellnessError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        WellnessError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: &str, id: &str) -> Self {
        WellnessError::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }
}
