//! Print callback endpoints command.

use paygate_client::{GatewayClient, RequestOrigin};

use crate::config::ShopConfig;
use crate::error::CliResult;
use crate::output::{EndpointsOutput, OutputFormat, Render};

/// Execute the endpoints command.
pub fn endpoints(
    client: &GatewayClient,
    shop: &ShopConfig,
    host: Option<String>,
    scheme: Option<String>,
    format: OutputFormat,
) -> CliResult<String> {
    let origin = RequestOrigin::new(
        scheme.unwrap_or_else(|| shop.scheme.clone()),
        host.unwrap_or_else(|| shop.host.clone()),
    );
    let endpoints = client.callback_endpoints(&origin)?;
    Ok(EndpointsOutput::from(endpoints).render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_test_utils::{test_client, MockTransport};

    #[test]
    fn test_endpoints_from_shop() {
        let client = test_client(MockTransport::new());
        let shop = ShopConfig {
            scheme: "https".into(),
            host: "shop.example.com".into(),
        };
        let out = endpoints(&client, &shop, None, None, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["return_url"], "https://shop.example.com/onepay/return");
        assert_eq!(json["notification_url"], "https://shop.example.com/onepay/ipn");
    }

    #[test]
    fn test_endpoints_host_override() {
        let client = test_client(MockTransport::new());
        let out = endpoints(
            &client,
            &ShopConfig::default(),
            Some("pay.example.org".into()),
            Some("http".into()),
            OutputFormat::Human,
        )
        .unwrap();
        assert!(out.contains("http://pay.example.org/onepay/ipn"));
    }
}
