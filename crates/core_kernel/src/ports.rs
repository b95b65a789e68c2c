//! Ports and Adapters Infrastructure
//!
//! This module provides the foundational types shared by every port in the
//! CRM domain. The domain defines port traits (what it needs from Capsule),
//! and the HTTP adapter implements them.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Calling Code                            │
//! │           (CLI, services, scripts using the client)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Port Traits                             │
//! │   (PartyPort, TaskPort, HistoryPort, TagPort, ...)          │
//! │   Defined in domain_crm, depend only on core_kernel          │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │   HTTP Adapter    │     │  In-memory mock  │
//!         │  (Capsule REST)   │     │   (tests only)   │
//!         └───────────────────┘     └──────────────────┘
//! ```

use std::fmt;
use thiserror::Error;

use crate::error::CoreError;

/// Error type for port operations
///
/// Every port method returns this type. Validation failures are reported as
/// [`PortError::RecordInvalid`]; HTTP failures are passed through with their
/// status preserved.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested record was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The record failed client-side validation and was not sent
    #[error("{entity_type} is invalid: {}", .errors.join("; "))]
    RecordInvalid {
        entity_type: String,
        errors: Vec<String>,
    },

    /// The operation needs a server-assigned id, but the record has none
    #[error("{entity_type} has not been saved; cannot {operation}")]
    NotPersisted {
        entity_type: String,
        operation: String,
    },

    /// Connection to Capsule failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// The API token was rejected
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        retry_after_secs: u64,
    },

    /// Capsule answered with a 5xx status
    #[error("Service unavailable ({status})")]
    ServiceUnavailable {
        status: u16,
    },

    /// Any other non-success status, passed through unchanged
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// The response could not be mapped onto a record
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a RecordInvalid error from a list of messages
    pub fn record_invalid(entity_type: impl Into<String>, errors: Vec<String>) -> Self {
        PortError::RecordInvalid {
            entity_type: entity_type.into(),
            errors,
        }
    }

    /// Creates a NotPersisted error
    pub fn not_persisted(entity_type: impl Into<String>, operation: impl Into<String>) -> Self {
        PortError::NotPersisted {
            entity_type: entity_type.into(),
            operation: operation.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::RateLimited { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error indicates the record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns true if this error is a client-side validation failure
    pub fn is_invalid(&self) -> bool {
        matches!(self, PortError::RecordInvalid { .. })
    }

    /// Returns the validation messages carried by a RecordInvalid error
    pub fn validation_errors(&self) -> &[String] {
        match self {
            PortError::RecordInvalid { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl From<CoreError> for PortError {
    fn from(error: CoreError) -> Self {
        PortError::transformation(error.to_string())
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker to ensure they are thread-safe and can
/// be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Party", "123");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("Party"));
        assert!(error.to_string().contains("123"));
    }

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::Timeout {
            operation: "GET /api/party".to_string(),
            duration_ms: 5000,
        };
        assert!(timeout.is_transient());

        let rate_limited = PortError::RateLimited {
            retry_after_secs: 60,
        };
        assert!(rate_limited.is_transient());

        let invalid = PortError::record_invalid("Task", vec!["Description can't be blank".into()]);
        assert!(!invalid.is_transient());
    }

    #[test]
    fn test_record_invalid_display_joins_messages() {
        let error = PortError::record_invalid(
            "History item",
            vec!["Note can't be blank".into(), "Party can't be blank".into()],
        );
        assert_eq!(
            error.to_string(),
            "History item is invalid: Note can't be blank; Party can't be blank"
        );
        assert_eq!(error.validation_errors().len(), 2);
    }
}
