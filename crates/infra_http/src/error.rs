//! HTTP error types
//!
//! This module defines the errors that can occur while talking to the
//! Capsule API and their translation into port errors.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during HTTP operations
#[derive(Debug, Error)]
pub enum HttpError {
    /// Missing or invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The base URL or a request path could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure: DNS, TLS, connection reset and so on
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// 401 or 403
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// 404
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// 429
    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// 5xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not valid JSON
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl HttpError {
    /// Checks if this error indicates the resource was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, HttpError::NotFound { .. })
    }

    /// Returns the HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Unauthorized { status, .. }
            | HttpError::Server { status, .. }
            | HttpError::Api { status, .. } => Some(*status),
            HttpError::NotFound { .. } => Some(404),
            HttpError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

impl From<HttpError> for PortError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::NotFound { path } => PortError::not_found("Resource", path),
            HttpError::Unauthorized { message, .. } => PortError::Unauthorized { message },
            HttpError::RateLimited { retry_after_secs } => PortError::RateLimited { retry_after_secs },
            HttpError::Server { status, .. } => PortError::ServiceUnavailable { status },
            HttpError::Api { status, message } => PortError::Api { status, message },
            HttpError::Timeout { operation, duration_ms } => PortError::Timeout { operation, duration_ms },
            HttpError::Request(source) => PortError::Connection {
                message: source.to_string(),
                source: Some(Box::new(source)),
            },
            HttpError::Decode(message) => PortError::transformation(message),
            HttpError::Config(message) => PortError::connection(message),
            HttpError::InvalidUrl(source) => PortError::Connection {
                message: source.to_string(),
                source: Some(Box::new(source)),
            },
        }
    }
}

/// Converts an HTTP error into a port error, naming the record on 404
pub fn into_port_error(error: HttpError, entity_type: &str, id: impl std::fmt::Display) -> PortError {
    match error {
        HttpError::NotFound { .. } => PortError::not_found(entity_type, id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let port: PortError = HttpError::Server { status: 503, message: String::new() }.into();
        assert!(matches!(port, PortError::ServiceUnavailable { status: 503 }));
        assert!(port.is_transient());

        let port: PortError = HttpError::Api { status: 422, message: "bad".into() }.into();
        assert!(matches!(port, PortError::Api { status: 422, .. }));
        assert!(!port.is_transient());
    }

    #[test]
    fn test_not_found_names_the_record() {
        let error = HttpError::NotFound { path: "/api/task/9".into() };
        assert_eq!(error.status(), Some(404));

        let port = into_port_error(error, "Task", 9);
        assert!(port.is_not_found());
        assert_eq!(port.to_string(), "Not found: Task with id 9");
    }
}
