//! What the web layer knows about the browser request that starts a payment.

use std::net::IpAddr;

use url::Url;

use crate::error::{GatewayError, GatewayResult};

/// Scheme, host and client address of an incoming browser request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
    pub client_ip: Option<String>,
}

impl RequestOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            client_ip: None,
        }
    }

    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    /// Resolve the client address: the first `X-Forwarded-For` entry, else the socket peer.
    pub fn client_ip_from(forwarded_for: Option<&str>, remote_addr: Option<IpAddr>) -> Option<String> {
        forwarded_for
            .and_then(|header| header.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string)
            .or_else(|| remote_addr.map(|addr| addr.to_string()))
    }

    /// Render `path` as an absolute URL on this origin.
    pub fn absolute_url(&self, path: &str) -> GatewayResult<String> {
        if self.host.trim().is_empty() {
            return Err(GatewayError::MissingReturnUrl);
        }
        let scheme = if self.scheme.is_empty() {
            "https"
        } else {
            self.scheme.as_str()
        };
        let base = Url::parse(&format!("{}://{}", scheme, self.host.trim()))
            .map_err(|_| GatewayError::MissingReturnUrl)?;
        let url = base.join(path).map_err(|_| GatewayError::MissingReturnUrl)?;
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        let origin = RequestOrigin::new("https", "shop.example.com");
        assert_eq!(
            origin.absolute_url("/onepay/return").unwrap(),
            "https://shop.example.com/onepay/return"
        );
    }

    #[test]
    fn test_absolute_url_with_port() {
        let origin = RequestOrigin::new("http", "localhost:8080");
        assert_eq!(
            origin.absolute_url("/onepay/ipn").unwrap(),
            "http://localhost:8080/onepay/ipn"
        );
    }

    #[test]
    fn test_empty_host_is_missing_return_url() {
        let origin = RequestOrigin::new("https", "");
        assert!(matches!(
            origin.absolute_url("/onepay/return"),
            Err(GatewayError::MissingReturnUrl)
        ));
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let remote: IpAddr = "10.0.0.1".parse().unwrap();
        assert_eq!(
            RequestOrigin::client_ip_from(Some("203.0.113.7, 10.0.0.2"), Some(remote)),
            Some("203.0.113.7".to_string())
        );
        assert_eq!(
            RequestOrigin::client_ip_from(Some("  "), Some(remote)),
            Some("10.0.0.1".to_string())
        );
        assert_eq!(RequestOrigin::client_ip_from(None, None), None);
    }
}
