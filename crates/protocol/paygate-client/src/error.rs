//! Error types for gateway operations.

use paygate_crypto::CryptoError;
use paygate_types::FieldError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while talking to the payment gateway.
///
/// Rejected or unverifiable payments are not errors: they come back as a
/// [`TransactionOutcome`](paygate_types::TransactionOutcome). These variants
/// cover what stops an operation from producing an outcome at all.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Credentials or endpoints are missing or invalid.
    #[error("gateway configuration error: {reason}")]
    Configuration {
        /// What is wrong
        reason: String,
    },

    /// The transaction amount is negative or too large to send.
    #[error("invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A payment request has no callback destination.
    #[error("missing return URL")]
    MissingReturnUrl,

    /// A field set could not be assembled (duplicate or empty name).
    #[error("field assembly error: {0}")]
    Field(#[from] FieldError),

    /// Network failure talking to the gateway.
    #[error("gateway transport error: {0}")]
    Transport(String),

    /// The gateway answered with a non-success HTTP status.
    #[error("gateway returned HTTP {status}: {body}")]
    TransportStatus {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },
}

impl GatewayError {
    /// Create a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Returns a user-friendly suggestion for recovering from this error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::Configuration { .. } => {
                "Check the merchant, access code and hash key issued by the gateway"
            }
            Self::InvalidAmount { .. } => "Use a non-negative amount",
            Self::MissingReturnUrl => "Provide a return URL and the host serving the callback",
            Self::Field(_) => "Custom and gateway data must not reuse reserved field names",
            Self::Transport(_) => "Check network connectivity to the gateway",
            Self::TransportStatus { .. } => "Retry later or check the gateway status",
        }
    }

    /// Returns true if this error is transient and the operation may succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::TransportStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<CryptoError> for GatewayError {
    fn from(e: CryptoError) -> Self {
        Self::config(format!("hash key: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_suggestions() {
        let err = GatewayError::InvalidAmount {
            amount: Decimal::NEGATIVE_ONE,
        };
        assert!(!err.suggestion().is_empty());
        assert!(!GatewayError::MissingReturnUrl.suggestion().is_empty());
    }

    #[test]
    fn test_error_transient() {
        assert!(GatewayError::Transport("timeout".into()).is_transient());
        assert!(GatewayError::TransportStatus {
            status: 503,
            body: String::new()
        }
        .is_transient());
        assert!(!GatewayError::TransportStatus {
            status: 400,
            body: String::new()
        }
        .is_transient());
        assert!(!GatewayError::MissingReturnUrl.is_transient());
    }

    #[test]
    fn test_field_error_conversion() {
        let err: GatewayError = FieldError::DuplicateField {
            name: "vpc_Amount".into(),
        }
        .into();
        assert!(err.to_string().contains("vpc_Amount"));
    }

    #[test]
    fn test_crypto_error_is_configuration() {
        let err: GatewayError = CryptoError::EmptySecret.into();
        assert!(matches!(err, GatewayError::Configuration { .. }));
    }
}
