//! Signing primitives for the paygate protocol.
//!
//! Every request sent to the gateway and every callback received from it is
//! authenticated with a keyed hash over a canonical form of its fields:
//!
//! ```text
//! canonical(F) = name1=value1&name2=value2&...      (sorted by name, signature excluded)
//! signature(F) = hex(HMAC-SHA256(secret, canonical(F)))
//! ```
//!
//! # Example
//!
//! ```
//! use paygate_crypto::{sign, verify, SharedSecret};
//! use paygate_types::{FieldSet, VerificationVerdict};
//!
//! let secret = SharedSecret::from_hex("6D0870CDE5F24F34F3915FB0045120DB").unwrap();
//! let fields = FieldSet::from_pairs([("vpc_Amount", "100"), ("vpc_Command", "pay")]).unwrap();
//!
//! let signature = sign(&fields, &secret);
//! assert_eq!(verify(&fields, &secret, Some(&signature)), VerificationVerdict::Verified);
//! assert_eq!(verify(&fields, &secret, None), VerificationVerdict::Absent);
//! ```

mod error;
mod secret;
mod signature;

pub use error::{CryptoError, CryptoResult};
pub use secret::SharedSecret;
pub use signature::{canonical_string, sign, verify};
