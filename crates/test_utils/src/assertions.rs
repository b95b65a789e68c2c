//! Custom Test Assertions
//!
//! Assertion helpers for port results that print the full error when a
//! check fails.

use std::fmt::Debug;

use core_kernel::PortError;

/// Asserts that `result` failed validation with exactly `messages`
///
/// # Panics
///
/// Panics if the result is `Ok`, fails with another error, or carries a
/// different set of messages.
pub fn assert_invalid<T: Debug>(result: Result<T, PortError>, messages: &[&str]) {
    match result {
        Err(PortError::RecordInvalid { errors, .. }) => {
            let mut actual: Vec<&str> = errors.iter().map(String::as_str).collect();
            let mut expected = messages.to_vec();
            actual.sort_unstable();
            expected.sort_unstable();
            assert_eq!(actual, expected, "Validation messages differ");
        }
        other => panic!("Expected RecordInvalid with {messages:?}, got {other:?}"),
    }
}

/// Asserts that `result` failed validation with at least `message`
pub fn assert_invalid_with<T: Debug>(result: Result<T, PortError>, message: &str) {
    match result {
        Err(error @ PortError::RecordInvalid { .. }) => assert!(
            error.validation_errors().iter().any(|e| e == message),
            "Expected '{message}' among {:?}",
            error.validation_errors()
        ),
        other => panic!("Expected RecordInvalid containing '{message}', got {other:?}"),
    }
}

/// Asserts that `result` failed with a not-found error for `entity_type`
pub fn assert_not_found<T: Debug>(result: Result<T, PortError>, entity_type: &str) {
    match result {
        Err(PortError::NotFound { entity_type: actual, .. }) => assert_eq!(
            actual, entity_type,
            "Not found error names the wrong record"
        ),
        other => panic!("Expected NotFound for {entity_type}, got {other:?}"),
    }
}

/// Asserts that `result` failed because the record was never saved
pub fn assert_not_persisted<T: Debug>(result: Result<T, PortError>) {
    assert!(
        matches!(result, Err(PortError::NotPersisted { .. })),
        "Expected NotPersisted, got {result:?}"
    );
}
