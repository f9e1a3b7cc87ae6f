//! CLI error types.

use paygate_client::GatewayError;
use thiserror::Error;

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error enum wrapping all crate errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gateway error.
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// IO error.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// User-facing error with actionable message.
    #[error("{0}")]
    User(String),
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a user-facing error.
    pub fn user(msg: impl Into<String>) -> Self {
        Self::User(msg.into())
    }

    /// Hint printed under the error message, if any.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Gateway(e) => Some(e.suggestion()),
            Self::Config(_) | Self::Toml(_) => {
                Some("Check the [gateway] section of the config file or the PAYGATE_* variables")
            }
            _ => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors: 1
            Self::User(_) => 1,
            Self::Gateway(
                GatewayError::InvalidAmount { .. }
                | GatewayError::MissingReturnUrl
                | GatewayError::Field(_),
            ) => 1,
            // Config errors: 3
            Self::Config(_) | Self::Toml(_) => 3,
            Self::Gateway(GatewayError::Configuration { .. }) => 3,
            // Gateway transport errors: 5
            Self::Gateway(GatewayError::Transport(_) | GatewayError::TransportStatus { .. }) => 5,
            // IO errors: 9
            Self::Io(_) => 9,
            // JSON/format errors: 10
            Self::Json(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::user("bad").exit_code(), 1);
        assert_eq!(CliError::config("missing").exit_code(), 3);
        assert_eq!(
            CliError::from(GatewayError::MissingReturnUrl).exit_code(),
            1
        );
        assert_eq!(
            CliError::from(GatewayError::config("merchant is not set")).exit_code(),
            3
        );
        assert_eq!(
            CliError::from(GatewayError::TransportStatus {
                status: 502,
                body: String::new()
            })
            .exit_code(),
            5
        );
    }

    #[test]
    fn test_gateway_suggestion_passes_through() {
        let err = CliError::from(GatewayError::Transport("timeout".into()));
        assert_eq!(
            err.suggestion(),
            Some("Check network connectivity to the gateway")
        );
        assert!(CliError::user("x").suggestion().is_none());
    }
}
