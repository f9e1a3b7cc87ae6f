//! Helper functions for creating test fixtures.
//!
//! Provides a fixed merchant configuration and a small gateway simulator that
//! produces callbacks signed the way the real gateway signs them.

use paygate_client::{GatewayClient, GatewayConfig, RequestOrigin};
use paygate_crypto::{sign, SharedSecret};
use paygate_types::constants::{
    FIELD_AMOUNT, FIELD_CALLER_RETURN_URL, FIELD_MERCH_TXN_REF, FIELD_ORDER_INFO,
    FIELD_SECURE_HASH, FIELD_TRANSACTION_TYPE, FIELD_TXN_RESPONSE_CODE,
};
use paygate_types::FieldSet;
use std::sync::Arc;

use crate::MockTransport;

/// Hash key of the test merchant.
pub const TEST_SECRET_HEX: &str = "6D0870CDE5F24F34F3915FB0045120DB";

/// Caller return URL carried by simulated callbacks.
pub const TEST_RETURN_URL: &str = "https://shop.example.com/orders/1";

/// Decoded test hash key.
pub fn test_secret() -> SharedSecret {
    SharedSecret::from_hex(TEST_SECRET_HEX).unwrap()
}

/// Sandbox configuration with every credential set.
pub fn test_config() -> GatewayConfig {
    GatewayConfig::sandbox("TESTONEPAY", "6BEB2546", TEST_SECRET_HEX).with_account("op01", "op123456")
}

/// Origin of a browser request to the test shop.
pub fn test_origin() -> RequestOrigin {
    RequestOrigin::new("https", "shop.example.com").with_client_ip("203.0.113.7")
}

/// A client wired to `transport`, using [`test_config`].
pub fn test_client(transport: MockTransport) -> GatewayClient {
    GatewayClient::with_transport(test_config(), Arc::new(transport)).unwrap()
}

/// Append a signature over `pairs`, as the gateway does.
pub fn sign_pairs<K, V>(
    pairs: impl IntoIterator<Item = (K, V)>,
    secret: &SharedSecret,
) -> Vec<(String, String)>
where
    K: Into<String>,
    V: Into<String>,
{
    let fields = FieldSet::from_pairs(pairs).unwrap();
    let signature = sign(&fields, secret);
    fields
        .iter()
        .map(|f| (f.name().to_string(), f.value().to_string()))
        .chain(std::iter::once((FIELD_SECURE_HASH.to_string(), signature)))
        .collect()
}

/// Unsigned callback pairs for a transaction of type `order`.
pub fn callback_pairs(
    request_code: &str,
    order_code: &str,
    amount_minor: u64,
    response_code: &str,
) -> Vec<(String, String)> {
    vec![
        (FIELD_MERCH_TXN_REF.to_string(), request_code.to_string()),
        (FIELD_ORDER_INFO.to_string(), order_code.to_string()),
        (FIELD_AMOUNT.to_string(), amount_minor.to_string()),
        (FIELD_TXN_RESPONSE_CODE.to_string(), response_code.to_string()),
        (FIELD_TRANSACTION_TYPE.to_string(), "order".to_string()),
        (FIELD_CALLER_RETURN_URL.to_string(), TEST_RETURN_URL.to_string()),
    ]
}

/// A callback signed with the test hash key.
pub fn signed_callback(
    request_code: &str,
    order_code: &str,
    amount_minor: u64,
    response_code: &str,
) -> Vec<(String, String)> {
    sign_pairs(
        callback_pairs(request_code, order_code, amount_minor, response_code),
        &test_secret(),
    )
}

/// Render pairs as a form-encoded query string.
pub fn to_query_string(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Replace the value of `name` in `pairs`, keeping its position.
pub fn tamper(pairs: &mut [(String, String)], name: &str, value: &str) {
    if let Some(pair) = pairs.iter_mut().find(|(k, _)| k == name) {
        pair.1 = value.to_string();
    }
}
