//! Field set signing and verification.

use hmac::{Hmac, Mac};
use paygate_types::constants::FIELD_SECURE_HASH;
use paygate_types::{FieldSet, VerificationVerdict};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::secret::SharedSecret;

type HmacSha256 = Hmac<Sha256>;

/// Feed the canonical form of `fields` to `sink`, piece by piece.
///
/// The signature field is skipped wherever it appears.
fn write_canonical(fields: &FieldSet, mut sink: impl FnMut(&str)) {
    let signable = fields
        .canonical_pairs()
        .filter(|(name, _)| *name != FIELD_SECURE_HASH);
    for (i, (name, value)) in signable.enumerate() {
        if i > 0 {
            sink("&");
        }
        sink(name);
        sink("=");
        sink(value);
    }
}

/// Render the canonical signature input of `fields`.
///
/// # Example
/// ```
/// use paygate_crypto::canonical_string;
/// use paygate_types::FieldSet;
///
/// let fields = FieldSet::from_pairs([
///     ("vpc_b", "2"),
///     ("vpc_SecureHash", "ignored"),
///     ("vpc_a", "1"),
/// ]).unwrap();
/// assert_eq!(canonical_string(&fields), "vpc_a=1&vpc_b=2");
/// ```
pub fn canonical_string(fields: &FieldSet) -> String {
    let mut out = String::new();
    write_canonical(fields, |piece| out.push_str(piece));
    out
}

/// Compute the lowercase hex HMAC-SHA256 of the canonical form of `fields`.
pub fn sign(fields: &FieldSet, secret: &SharedSecret) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    write_canonical(fields, |piece| mac.update(piece.as_bytes()));
    hex::encode(mac.finalize().into_bytes())
}

/// Check `candidate` against the signature recomputed over `fields`.
///
/// Comparison ignores ASCII case and runs in constant time for equal-length
/// inputs. A missing or blank candidate yields [`VerificationVerdict::Absent`].
pub fn verify(
    fields: &FieldSet,
    secret: &SharedSecret,
    candidate: Option<&str>,
) -> VerificationVerdict {
    let candidate = match candidate.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_ascii_lowercase(),
        _ => return VerificationVerdict::Absent,
    };

    let expected = sign(fields, secret);
    if bool::from(expected.as_bytes().ct_eq(candidate.as_bytes())) {
        VerificationVerdict::Verified
    } else {
        VerificationVerdict::Tampered
    }
}
