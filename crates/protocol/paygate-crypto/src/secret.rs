//! Shared secret handling.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};

/// Key material shared with the gateway.
///
/// Cleared from memory on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Decode a hex-encoded secret, as issued by the gateway.
    ///
    /// Surrounding whitespace is ignored; case is not significant.
    pub fn from_hex(encoded: &str) -> CryptoResult<Self> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(CryptoError::EmptySecret);
        }
        let bytes =
            hex::decode(encoded).map_err(|e| CryptoError::InvalidSecretEncoding(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Use raw bytes as the secret.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> CryptoResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CryptoError::EmptySecret);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedSecret([REDACTED])")
    }
}
