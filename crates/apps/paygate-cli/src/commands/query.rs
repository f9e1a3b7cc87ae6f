//! Query transaction status command.

use paygate_client::GatewayClient;

use crate::error::CliResult;
use crate::output::{OutputFormat, Render, StatusOutput};

/// Execute the query command.
pub async fn query(
    client: &GatewayClient,
    request_code: &str,
    format: OutputFormat,
) -> CliResult<String> {
    let report = client.query_status(request_code).await?;
    Ok(StatusOutput::new(request_code, report).render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_test_utils::{sign_pairs, test_client, test_secret, MockTransport};

    #[tokio::test]
    async fn test_query_output() {
        let reply = sign_pairs(
            [("vpc_MerchTxnRef", "REQ1"), ("vpc_TxnResponseCode", "0")],
            &test_secret(),
        );
        let client = test_client(MockTransport::new().with_pairs(reply));

        let out = query(&client, "REQ1", OutputFormat::Json).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["outcome"], "succeeded");
        assert_eq!(json["gateway_data"]["TxnResponseCode"], "0");
    }

    #[tokio::test]
    async fn test_query_gateway_down() {
        let client = test_client(MockTransport::new().with_status(503, "unavailable"));
        let err = query(&client, "REQ1", OutputFormat::Human).await.unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
