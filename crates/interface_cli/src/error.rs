//! CLI error handling

use thiserror::Error;

use core_kernel::PortError;
use infra_http::HttpError;

/// Errors surfaced to the command line
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error("Could not render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error
    ///
    /// Follows the BSD `sysexits` convention: 65 for invalid input data,
    /// 69 for an unavailable service, 78 for configuration problems.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::Http(HttpError::Config(_)) => 78,
            CliError::Port(PortError::RecordInvalid { .. }) => 65,
            CliError::Port(error) if error.is_transient() => 69,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let invalid = CliError::Port(PortError::record_invalid("Task", vec!["x".into()]));
        assert_eq!(invalid.exit_code(), 65);

        let busy = CliError::Port(PortError::RateLimited { retry_after_secs: 60 });
        assert_eq!(busy.exit_code(), 69);

        let config = CliError::Http(HttpError::Config("API token is required".into()));
        assert_eq!(config.exit_code(), 78);

        let missing = CliError::Port(PortError::not_found("Party", 3));
        assert_eq!(missing.exit_code(), 1);
    }
}
