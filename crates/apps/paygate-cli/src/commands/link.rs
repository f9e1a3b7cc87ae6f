//! Create payment link command.

use paygate_client::{GatewayClient, RequestOrigin};
use paygate_types::TransactionRequest;
use rust_decimal::Decimal;

use crate::config::ShopConfig;
use crate::error::CliResult;
use crate::output::{LinkOutput, OutputFormat, Render};

/// Arguments of the link command.
#[derive(Debug, Clone, Default)]
pub struct LinkArgs {
    pub order: String,
    pub amount: Decimal,
    pub return_url: String,
    pub transaction_type: String,
    pub request_code: Option<String>,
    pub data: Vec<(String, String)>,
    pub gateway_data: Vec<(String, String)>,
    pub host: Option<String>,
    pub scheme: Option<String>,
    pub client_ip: Option<String>,
}

/// Execute the link command.
pub fn link(
    client: &GatewayClient,
    shop: &ShopConfig,
    args: LinkArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let mut request = TransactionRequest::new(args.order, args.amount);
    if let Some(code) = args.request_code {
        request = request.with_request_code(code);
    }
    request.data.extend(args.data);
    request.gateway_data.extend(args.gateway_data);

    let mut origin = RequestOrigin::new(
        args.scheme.unwrap_or_else(|| shop.scheme.clone()),
        args.host.unwrap_or_else(|| shop.host.clone()),
    );
    origin.client_ip = args.client_ip;

    let url = client.create_payment_link(
        &args.transaction_type,
        &request,
        &args.return_url,
        &origin,
    )?;

    let output = LinkOutput {
        url,
        request_code: request.request_code,
        order_code: request.order_code,
        amount: request.amount,
    };
    Ok(output.render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_test_utils::{test_client, MockTransport};

    fn args() -> LinkArgs {
        LinkArgs {
            order: "ORDER-1".into(),
            amount: Decimal::from(150000),
            return_url: "https://shop.example.com/done".into(),
            transaction_type: "order".into(),
            request_code: Some("REQ123".into()),
            data: vec![("note".into(), "gift".into())],
            ..Default::default()
        }
    }

    #[test]
    fn test_link_json() {
        let client = test_client(MockTransport::new());
        let out = link(&client, &ShopConfig::default(), args(), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["request_code"], "REQ123");
        let url = json["url"].as_str().unwrap();
        assert!(url.contains("vpc_Amount=15000000"));
        assert!(url.contains("user_note=gift"));
        assert!(url.contains("vpc_ReturnURL=https%3A%2F%2Flocalhost%2Fonepay%2Freturn"));
    }

    #[test]
    fn test_link_host_override() {
        let client = test_client(MockTransport::new());
        let args = LinkArgs {
            host: Some("pay.example.org".into()),
            ..args()
        };
        let out = link(&client, &ShopConfig::default(), args, OutputFormat::Json).unwrap();
        assert!(out.contains("pay.example.org"));
    }

    #[test]
    fn test_link_negative_amount() {
        let client = test_client(MockTransport::new());
        let args = LinkArgs {
            amount: Decimal::NEGATIVE_ONE,
            ..args()
        };
        let err = link(&client, &ShopConfig::default(), args, OutputFormat::Human).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
