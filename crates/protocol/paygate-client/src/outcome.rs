//! Transaction outcome classification.
//!
//! | Verdict            | Response code | Outcome   |
//! |--------------------|---------------|-----------|
//! | verified           | `"0"`         | succeeded |
//! | tampered or absent | `"0"`         | pending   |
//! | any                | other/missing | failed    |

use paygate_types::constants::RESPONSE_CODE_APPROVED;
use paygate_types::{TransactionOutcome, TransactionResponse, VerificationVerdict};
use tracing::{debug, warn};

use crate::verifier::CheckedResponse;

/// Map a verdict and a gateway response code to an outcome.
///
/// `Succeeded` is only reachable through a verified payload.
pub fn classify(verdict: VerificationVerdict, response_code: Option<&str>) -> TransactionOutcome {
    let approved = response_code.map(str::trim) == Some(RESPONSE_CODE_APPROVED);
    match (approved, verdict) {
        (true, VerificationVerdict::Verified) => TransactionOutcome::Succeeded,
        (true, VerificationVerdict::Tampered | VerificationVerdict::Absent) => {
            TransactionOutcome::Pending
        }
        (false, _) => TransactionOutcome::Failed,
    }
}

/// Classify a checked payload into the caller-facing response.
pub fn classify_response(response: &CheckedResponse) -> TransactionResponse {
    let verdict = response.verdict();
    let outcome = classify(verdict, response.response_code());

    if outcome == TransactionOutcome::Pending {
        match verdict {
            VerificationVerdict::Tampered => warn!(
                request_code = %response.request_code(),
                verdict = %verdict,
                "Approval code carried an invalid signature, holding as pending"
            ),
            _ => debug!(
                request_code = %response.request_code(),
                verdict = %verdict,
                "Unsigned approval, holding as pending"
            ),
        }
    }

    debug!(
        request_code = %response.request_code(),
        verdict = %verdict,
        outcome = %outcome,
        "Classified gateway response"
    );

    TransactionResponse {
        outcome,
        request_code: response.request_code().to_string(),
        order_code: response.order_code().to_string(),
        amount: response.amount().to_major(),
        gateway_data: response.gateway_data(),
        data: response.custom_data(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_crypto::SharedSecret;
    use paygate_types::FieldSet;

    use VerificationVerdict::*;

    #[test]
    fn test_classification_table() {
        assert_eq!(classify(Verified, Some("0")), TransactionOutcome::Succeeded);
        assert_eq!(classify(Verified, Some(" 0 ")), TransactionOutcome::Succeeded);
        assert_eq!(classify(Tampered, Some("0")), TransactionOutcome::Pending);
        assert_eq!(classify(Absent, Some("0")), TransactionOutcome::Pending);
        assert_eq!(classify(Verified, Some("1")), TransactionOutcome::Failed);
        assert_eq!(classify(Tampered, Some("1")), TransactionOutcome::Failed);
        assert_eq!(classify(Verified, None), TransactionOutcome::Failed);
        assert_eq!(classify(Absent, Some("")), TransactionOutcome::Failed);
    }

    #[test]
    fn test_succeeded_requires_verified() {
        for verdict in [Tampered, Absent] {
            for code in [Some("0"), Some("1"), Some("99"), None] {
                assert_ne!(classify(verdict, code), TransactionOutcome::Succeeded);
            }
        }
    }

    #[test]
    fn test_classify_response_non_numeric_amount() {
        let fields = FieldSet::from_pairs([
            ("vpc_Amount", "lots"),
            ("vpc_TxnResponseCode", "0"),
            ("vpc_MerchTxnRef", "REQ1"),
        ])
        .unwrap();
        let secret = SharedSecret::from_hex("01").unwrap();
        let response = classify_response(&CheckedResponse::check(fields, &secret));
        assert_eq!(response.outcome, TransactionOutcome::Pending);
        assert!(response.amount.is_zero());
        assert_eq!(response.request_code, "REQ1");
    }
}
