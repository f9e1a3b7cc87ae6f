//! Gateway configuration and the signing context derived from it.

use std::time::Duration;

use paygate_crypto::SharedSecret;
use paygate_types::constants::{PAYMENT_ENDPOINT, QUERY_ENDPOINT};
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Sandbox gateway base URL.
pub const SANDBOX_API_URL: &str = "https://mtf.onepay.vn";

/// Production gateway base URL.
pub const PRODUCTION_API_URL: &str = "https://onepay.vn";

/// Default path the gateway redirects the browser back to.
pub const DEFAULT_RETURN_PATH: &str = "/onepay/return";

/// Default path receiving server-to-server notifications.
pub const DEFAULT_IPN_PATH: &str = "/onepay/ipn";

/// Default HTTP timeout for status queries, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Merchant credentials and endpoints issued by the gateway.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gateway base URL (e.g., "https://mtf.onepay.vn").
    pub api_url: String,

    /// Path on the merchant site the browser returns to.
    pub return_path: String,

    /// Path on the merchant site receiving notifications.
    pub ipn_path: String,

    /// Account user, required for status queries only.
    pub user: String,

    /// Account password, required for status queries only.
    pub password: String,

    pub access_code: String,

    pub merchant: String,

    /// Hex-encoded shared secret.
    pub hash_key: String,

    pub locale: String,

    pub currency: String,

    /// HTTP timeout for status queries.
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: SANDBOX_API_URL.to_string(),
            return_path: DEFAULT_RETURN_PATH.to_string(),
            ipn_path: DEFAULT_IPN_PATH.to_string(),
            user: String::new(),
            password: String::new(),
            access_code: String::new(),
            merchant: String::new(),
            hash_key: String::new(),
            locale: "vn".to_string(),
            currency: "VND".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Create a sandbox configuration.
    pub fn sandbox(merchant: &str, access_code: &str, hash_key: &str) -> Self {
        Self {
            merchant: merchant.to_string(),
            access_code: access_code.to_string(),
            hash_key: hash_key.to_string(),
            ..Self::default()
        }
    }

    /// Create a production configuration.
    pub fn production(merchant: &str, access_code: &str, hash_key: &str) -> Self {
        Self {
            api_url: PRODUCTION_API_URL.to_string(),
            ..Self::sandbox(merchant, access_code, hash_key)
        }
    }

    /// Set the account credentials used by status queries.
    pub fn with_account(mut self, user: &str, password: &str) -> Self {
        self.user = user.to_string();
        self.password = password.to_string();
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn payment_endpoint(&self) -> String {
        format!("{}{}", self.base_url(), PAYMENT_ENDPOINT)
    }

    pub fn query_endpoint(&self) -> String {
        format!("{}{}", self.base_url(), QUERY_ENDPOINT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that everything a payment link needs is present.
    pub fn validate_for_payment(&self) -> GatewayResult<()> {
        require("api_url", &self.api_url)?;
        require("access_code", &self.access_code)?;
        require("merchant", &self.merchant)?;
        require("hash_key", &self.hash_key)
    }

    /// Check that everything a status query needs is present.
    pub fn validate_for_query(&self) -> GatewayResult<()> {
        self.validate_for_payment()?;
        require("user", &self.user)?;
        require("password", &self.password)
    }
}

fn require(name: &str, value: &str) -> GatewayResult<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::config(format!("{} is not set", name)));
    }
    Ok(())
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_url", &self.api_url)
            .field("return_path", &self.return_path)
            .field("ipn_path", &self.ipn_path)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("access_code", &self.access_code)
            .field("merchant", &self.merchant)
            .field("hash_key", &"[REDACTED]")
            .field("locale", &self.locale)
            .field("currency", &self.currency)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Read-only signing material and endpoints for one client.
///
/// Built once from a [`GatewayConfig`]; the secret is decoded here and never
/// re-read from configuration.
#[derive(Clone)]
pub struct SignatureContext {
    secret: SharedSecret,
    payment_endpoint: String,
    query_endpoint: String,
}

impl SignatureContext {
    /// Decode the hash key of `config`.
    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        let secret = SharedSecret::from_hex(&config.hash_key)?;
        Ok(Self::new(
            secret,
            config.payment_endpoint(),
            config.query_endpoint(),
        ))
    }

    pub fn new(
        secret: SharedSecret,
        payment_endpoint: impl Into<String>,
        query_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            secret,
            payment_endpoint: payment_endpoint.into(),
            query_endpoint: query_endpoint.into(),
        }
    }

    pub fn secret(&self) -> &SharedSecret {
        &self.secret
    }

    pub fn payment_endpoint(&self) -> &str {
        &self.payment_endpoint
    }

    pub fn query_endpoint(&self) -> &str {
        &self.query_endpoint
    }
}

impl std::fmt::Debug for SignatureContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureContext")
            .field("secret", &"[REDACTED]")
            .field("payment_endpoint", &self.payment_endpoint)
            .field("query_endpoint", &self.query_endpoint)
            .finish()
    }
}
