//! Core error types used across the system

use thiserror::Error;

/// Errors raised while interpreting Capsule payloads and identifiers
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid {entity} identifier: {value:?}")]
    InvalidIdentifier { entity: String, value: String },

    #[error("Missing key `{0}` in response payload")]
    MissingKey(String),

    #[error("Attributes must be a JSON object, got {0}")]
    InvalidAttributes(String),

    #[error("Unknown attributes: {}", .0.join(", "))]
    UnknownAttributes(Vec<String>),

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

impl CoreError {
    pub fn invalid_identifier(entity: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::InvalidIdentifier {
            entity: entity.into(),
            value: value.into(),
        }
    }

    pub fn missing_key(key: impl Into<String>) -> Self {
        CoreError::MissingKey(key.into())
    }
}
