//! Inbound payload parsing, signature checking and field extraction.

use std::collections::BTreeMap;

use paygate_crypto::{verify as verify_signature, SharedSecret};
use paygate_types::constants::{
    FIELD_AMOUNT, FIELD_CALLER_RETURN_URL, FIELD_MERCH_TXN_REF, FIELD_ORDER_INFO,
    FIELD_SECURE_HASH, FIELD_TRANSACTION_TYPE, FIELD_TXN_RESPONSE_CODE, GATEWAY_PREFIX,
    RESERVED_CUSTOM_KEYS,
};
use paygate_types::{FieldSet, MinorUnit, Namespace, VerificationVerdict};

use crate::error::GatewayResult;

/// Build a field set from inbound pairs, rejecting duplicate names.
pub fn parse<I, K, V>(pairs: I) -> GatewayResult<FieldSet>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Ok(FieldSet::from_pairs(pairs)?)
}

/// Parse an `application/x-www-form-urlencoded` payload or URL query.
///
/// A leading `?` is ignored.
pub fn parse_query_string(raw: &str) -> GatewayResult<FieldSet> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    parse(url::form_urlencoded::parse(raw.as_bytes()).into_owned())
}

/// Check the signature embedded in `fields`.
pub fn verify(fields: &FieldSet, secret: &SharedSecret) -> VerificationVerdict {
    verify_signature(fields, secret, fields.get(FIELD_SECURE_HASH))
}

/// An inbound payload together with its verdict.
///
/// Accessors read the raw fields whatever the verdict; only
/// [`trusted_return_url`](Self::trusted_return_url) is gated on verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedResponse {
    fields: FieldSet,
    verdict: VerificationVerdict,
}

impl CheckedResponse {
    /// Verify `fields` and keep the verdict alongside them.
    pub fn check(fields: FieldSet, secret: &SharedSecret) -> Self {
        let verdict = verify(&fields, secret);
        Self { fields, verdict }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn verdict(&self) -> VerificationVerdict {
        self.verdict
    }

    pub fn response_code(&self) -> Option<&str> {
        self.fields.get(FIELD_TXN_RESPONSE_CODE)
    }

    pub fn request_code(&self) -> &str {
        self.fields.get(FIELD_MERCH_TXN_REF).unwrap_or_default()
    }

    pub fn order_code(&self) -> &str {
        self.fields.get(FIELD_ORDER_INFO).unwrap_or_default()
    }

    /// Wire amount in minor units; non-numeric values read as zero.
    pub fn amount(&self) -> MinorUnit {
        MinorUnit::parse_lenient(self.fields.get(FIELD_AMOUNT))
    }

    /// Declared transaction type tag.
    pub fn transaction_type(&self) -> Option<&str> {
        self.fields.get(FIELD_TRANSACTION_TYPE)
    }

    /// Caller return URL, only when the payload verified.
    pub fn trusted_return_url(&self) -> Option<&str> {
        if self.verdict.is_verified() {
            self.fields.get(FIELD_CALLER_RETURN_URL)
        } else {
            None
        }
    }

    /// Gateway fields with the prefix stripped, signature excluded.
    pub fn gateway_data(&self) -> BTreeMap<String, String> {
        let mut data = self.fields.namespace_map(Namespace::Gateway);
        data.remove(&FIELD_SECURE_HASH[GATEWAY_PREFIX.len()..]);
        data
    }

    /// Custom fields with the prefix stripped, reserved metadata excluded.
    pub fn custom_data(&self) -> BTreeMap<String, String> {
        let mut data = self.fields.namespace_map(Namespace::Custom);
        data.retain(|key, _| !RESERVED_CUSTOM_KEYS.contains(&key.as_str()));
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_crypto::sign;

    fn secret() -> SharedSecret {
        SharedSecret::from_hex("A3EFDFABA8653DF2342E8DAC29B51AF0").unwrap()
    }

    fn signed(pairs: &[(&str, &str)]) -> FieldSet {
        let mut fields = FieldSet::from_pairs(pairs.iter().copied()).unwrap();
        let signature = sign(&fields, &secret());
        fields.add(FIELD_SECURE_HASH, signature).unwrap();
        fields
    }

    #[test]
    fn test_parse_query_string() {
        let fields = parse_query_string("?vpc_Amount=100&user_note=a%20b+c").unwrap();
        assert_eq!(fields.get("vpc_Amount"), Some("100"));
        assert_eq!(fields.get("user_note"), Some("a b c"));
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        assert!(parse_query_string("vpc_Amount=1&vpc_Amount=2").is_err());
    }

    #[test]
    fn test_verdicts() {
        let fields = signed(&[("vpc_Amount", "100")]);
        assert_eq!(verify(&fields, &secret()), VerificationVerdict::Verified);

        let unsigned = FieldSet::from_pairs([("vpc_Amount", "100")]).unwrap();
        assert_eq!(verify(&unsigned, &secret()), VerificationVerdict::Absent);

        let forged = FieldSet::from_pairs([("vpc_Amount", "100"), ("vpc_SecureHash", "00ff")])
            .unwrap();
        assert_eq!(verify(&forged, &secret()), VerificationVerdict::Tampered);
    }

    #[test]
    fn test_extraction() {
        let fields = signed(&[
            ("vpc_Amount", "15000000"),
            ("vpc_MerchTxnRef", "REQ1"),
            ("vpc_OrderInfo", "ORDER-1"),
            ("user_Type", "order"),
            ("user_returnUrl", "https://shop.example.com/done"),
            ("user_note", "gift"),
            ("Title", "unprefixed"),
        ]);
        let response = CheckedResponse::check(fields, &secret());

        assert_eq!(response.verdict(), VerificationVerdict::Verified);
        assert_eq!(response.amount(), MinorUnit(15_000_000));
        assert_eq!(response.request_code(), "REQ1");
        assert_eq!(response.order_code(), "ORDER-1");
        assert_eq!(response.transaction_type(), Some("order"));
        assert_eq!(
            response.trusted_return_url(),
            Some("https://shop.example.com/done")
        );

        let gateway = response.gateway_data();
        assert_eq!(gateway.len(), 3);
        assert!(!gateway.contains_key("SecureHash"));

        let custom = response.custom_data();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom["note"], "gift");
    }

    #[test]
    fn test_return_url_untrusted_when_tampered() {
        let mut fields = signed(&[("user_returnUrl", "https://shop.example.com/done")]);
        fields.add("vpc_Extra", "injected").unwrap();
        let response = CheckedResponse::check(fields, &secret());
        assert_eq!(response.verdict(), VerificationVerdict::Tampered);
        assert_eq!(response.trusted_return_url(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let response = CheckedResponse::check(FieldSet::new(), &secret());
        assert_eq!(response.request_code(), "");
        assert_eq!(response.amount(), MinorUnit(0));
        assert_eq!(response.response_code(), None);
    }
}
