//! Verify callback command.

use paygate_client::{verifier, CallbackDispatcher, GatewayClient};

use crate::error::CliResult;
use crate::output::{CallbackOutput, OutputFormat, Render};

/// Execute the callback command.
///
/// A notification is answered with the acknowledgement body the gateway expects.
pub async fn callback(
    client: &GatewayClient,
    query: &str,
    notification: bool,
    format: OutputFormat,
) -> CliResult<String> {
    if !notification {
        let callback = client.process_callback_query(query.trim())?;
        return Ok(CallbackOutput::from(callback).render(format));
    }

    let fields = verifier::parse_query_string(query.trim())?;
    let pairs = fields
        .iter()
        .map(|field| (field.name().to_string(), field.value().to_string()));
    let (callback, ack) = client
        .handle_notification(pairs, &CallbackDispatcher::new())
        .await?;
    Ok(CallbackOutput::from(callback).with_ack(ack).render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_test_utils::{
        signed_callback, tamper, test_client, to_query_string, MockTransport, TEST_RETURN_URL,
    };

    #[tokio::test]
    async fn test_verified_callback() {
        let client = test_client(MockTransport::new());
        let query = to_query_string(&signed_callback("REQ1", "ORDER-1", 15_000_000, "0"));

        let out = callback(&client, &query, false, OutputFormat::Json)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["outcome"], "succeeded");
        assert_eq!(json["verdict"], "verified");
        assert_eq!(json["amount"], "150000");
        assert_eq!(json["return_url"], TEST_RETURN_URL);
    }

    #[tokio::test]
    async fn test_tampered_callback_hides_return_url() {
        let client = test_client(MockTransport::new());
        let mut pairs = signed_callback("REQ1", "ORDER-1", 15_000_000, "0");
        tamper(&mut pairs, "vpc_Amount", "1");

        let out = callback(&client, &to_query_string(&pairs), false, OutputFormat::Json)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["outcome"], "pending");
        assert_eq!(json["verdict"], "tampered");
        assert!(json["return_url"].is_null());
    }

    #[tokio::test]
    async fn test_human_output() {
        let client = test_client(MockTransport::new());
        let query = to_query_string(&signed_callback("REQ1", "ORDER-1", 100, "1"));
        let out = callback(&client, &query, false, OutputFormat::Human)
            .await
            .unwrap();
        assert!(out.contains("failed"));
        assert!(out.contains("REQ1"));
    }

    #[tokio::test]
    async fn test_notification_prints_ack() {
        let client = test_client(MockTransport::new());
        let query = to_query_string(&signed_callback("REQ1", "ORDER-1", 15_000_000, "0"));

        let out = callback(&client, &query, true, OutputFormat::Json)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["outcome"], "succeeded");
        assert_eq!(json["ack"], "responsecode=1&desc=confirm-success");

        let plain = callback(&client, &query, false, OutputFormat::Json)
            .await
            .unwrap();
        assert!(!plain.contains("\"ack\""));
    }
}
