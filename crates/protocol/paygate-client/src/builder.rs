//! Outbound field assembly and rendering.
//!
//! Payment links and status queries are both a [`FieldSet`] signed with the
//! shared secret. Fields render in insertion order; the signature is appended
//! last.

use paygate_crypto::{sign, SharedSecret};
use paygate_types::constants::{
    COMMAND_PAY, COMMAND_QUERY_DR, FIELD_ACCESS_CODE, FIELD_AMOUNT, FIELD_CALLER_RETURN_URL,
    FIELD_COMMAND, FIELD_CURRENCY, FIELD_LOCALE, FIELD_MERCHANT, FIELD_MERCH_TXN_REF,
    FIELD_ORDER_INFO, FIELD_PASSWORD, FIELD_RETURN_URL, FIELD_SECURE_HASH, FIELD_TICKET_NO,
    FIELD_TRANSACTION_TYPE, FIELD_USER, FIELD_VERSION, PROTOCOL_VERSION,
};
use paygate_types::{FieldSet, MinorUnit, Namespace, TransactionRequest};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};

/// Everything except RFC 3986 unreserved characters is escaped.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Per-request values a payment link needs beyond the transaction itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentContext {
    /// Caller-defined transaction type, echoed back in the callback.
    pub transaction_type: String,

    /// Where the caller sends the browser once the callback is processed.
    pub return_url: String,

    /// Absolute URL the gateway redirects the browser to.
    pub callback_url: String,

    /// Address of the paying browser, if known.
    pub client_ip: Option<String>,
}

/// Assemble the fields of a payment redirect.
pub fn build_payment_fields(
    request: &TransactionRequest,
    config: &GatewayConfig,
    context: &PaymentContext,
) -> GatewayResult<FieldSet> {
    if context.return_url.trim().is_empty() || context.callback_url.trim().is_empty() {
        return Err(GatewayError::MissingReturnUrl);
    }
    let amount = MinorUnit::from_major(request.amount).ok_or(GatewayError::InvalidAmount {
        amount: request.amount,
    })?;

    let mut fields = FieldSet::new();
    fields.add(FIELD_VERSION, PROTOCOL_VERSION)?;
    fields.add(FIELD_CURRENCY, config.currency.as_str())?;
    fields.add(FIELD_COMMAND, COMMAND_PAY)?;
    fields.add(FIELD_ACCESS_CODE, config.access_code.as_str())?;
    fields.add(FIELD_MERCHANT, config.merchant.as_str())?;
    fields.add(FIELD_LOCALE, config.locale.as_str())?;
    fields.add(FIELD_RETURN_URL, context.callback_url.as_str())?;
    fields.add(FIELD_MERCH_TXN_REF, request.request_code.as_str())?;
    fields.add(FIELD_ORDER_INFO, request.order_code.as_str())?;
    fields.add(FIELD_AMOUNT, amount.to_string())?;
    if let Some(ip) = &context.client_ip {
        fields.add(FIELD_TICKET_NO, ip.as_str())?;
    }
    fields.add(FIELD_TRANSACTION_TYPE, context.transaction_type.as_str())?;
    fields.add(FIELD_CALLER_RETURN_URL, context.return_url.as_str())?;

    for (key, value) in &request.gateway_data {
        fields.add_in(Namespace::Gateway, key, value.as_str())?;
    }
    for (key, value) in &request.data {
        fields.add_in(Namespace::Custom, key, value.as_str())?;
    }

    Ok(fields)
}

/// Assemble the fields of a status query for `request_code`.
pub fn build_query_fields(request_code: &str, config: &GatewayConfig) -> GatewayResult<FieldSet> {
    let mut fields = FieldSet::new();
    fields.add(FIELD_COMMAND, COMMAND_QUERY_DR)?;
    fields.add(FIELD_VERSION, PROTOCOL_VERSION)?;
    fields.add(FIELD_MERCH_TXN_REF, request_code)?;
    fields.add(FIELD_MERCHANT, config.merchant.as_str())?;
    fields.add(FIELD_ACCESS_CODE, config.access_code.as_str())?;
    fields.add(FIELD_USER, config.user.as_str())?;
    fields.add(FIELD_PASSWORD, config.password.as_str())?;
    Ok(fields)
}

/// Signed pairs in render order, signature last.
///
/// A signature field already present in `fields` is dropped in favour of the
/// freshly computed one.
pub fn render_form(fields: &FieldSet, secret: &SharedSecret) -> Vec<(String, String)> {
    let signature = sign(fields, secret);
    fields
        .iter()
        .filter(|f| f.name() != FIELD_SECURE_HASH)
        .map(|f| (f.name().to_string(), f.value().to_string()))
        .chain(std::iter::once((FIELD_SECURE_HASH.to_string(), signature)))
        .collect()
}

/// Render `fields` as a percent-encoded query string with the signature appended.
pub fn render_query(fields: &FieldSet, secret: &SharedSecret) -> String {
    render_form(fields, secret)
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(name, QUERY_ENCODE_SET),
                utf8_percent_encode(value, QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
