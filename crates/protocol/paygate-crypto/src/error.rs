//! Error types for paygate-crypto

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur when preparing signing material
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The shared secret is empty
    #[error("shared secret is empty")]
    EmptySecret,

    /// The shared secret is not valid hexadecimal
    #[error("shared secret is not valid hex: {0}")]
    InvalidSecretEncoding(String),
}
