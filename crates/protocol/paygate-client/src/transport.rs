//! Transport seam for status queries.
//!
//! The protocol layer only needs one exchange: POST a form, get back a flat
//! string mapping. [`HttpTransport`] does this over HTTPS with `reqwest`;
//! tests substitute an in-memory implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};

/// Sends a form to the gateway and returns the reply as name/value pairs.
///
/// Implementations surface network failures and non-success statuses as
/// errors and never retry. A reply that arrives but cannot be read is not an
/// error: it comes back as no pairs, which verifies as unsigned.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> GatewayResult<Vec<(String, String)>>;
}

/// HTTPS transport expecting a JSON object reply.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        Self::new(config.timeout())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> GatewayResult<Vec<(String, String)>> {
        debug!(url = %url, fields = form.len(), "Posting form to gateway");

        let response = self.client.post(url).form(form).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::TransportStatus { status, body });
        }

        let body = response.text().await?;
        Ok(flatten_json_object(&body))
    }
}

/// Flatten a JSON object reply into string pairs.
///
/// Strings are taken as-is, other scalars are rendered, `null` members are
/// dropped and nested values are kept as JSON text. Anything but a JSON
/// object yields no pairs.
pub fn flatten_json_object(body: &str) -> Vec<(String, String)> {
    let map = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("Gateway reply is not a JSON object");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Failed to parse gateway reply");
            return Vec::new();
        }
    };

    map.into_iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_scalars() {
        let pairs = flatten_json_object(
            r#"{"vpc_TxnResponseCode":"0","vpc_Amount":15000000,"vpc_Paid":true,"vpc_Note":null}"#,
        );
        let find = |name: &str| pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());
        assert_eq!(find("vpc_TxnResponseCode"), Some("0"));
        assert_eq!(find("vpc_Amount"), Some("15000000"));
        assert_eq!(find("vpc_Paid"), Some("true"));
        assert_eq!(find("vpc_Note"), None);
    }

    #[test]
    fn test_flatten_nested_kept_as_json() {
        let pairs = flatten_json_object(r#"{"vpc_Items":[1,2]}"#);
        assert_eq!(pairs, vec![("vpc_Items".to_string(), "[1,2]".to_string())]);
    }

    #[test]
    fn test_flatten_non_object_is_empty() {
        assert!(flatten_json_object("[1,2]").is_empty());
        assert!(flatten_json_object("\"0\"").is_empty());
        assert!(flatten_json_object("<html>").is_empty());
        assert!(flatten_json_object("").is_empty());
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(Duration::from_secs(5)).is_ok());
    }
}
