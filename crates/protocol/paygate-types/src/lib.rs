//! Data structures for the paygate redirect-and-callback protocol.
//!
//! This crate holds the vocabulary shared by the signing engine and the
//! gateway client. It contains no signing or transport logic, only the
//! types that flow between them.
//!
//! # Module Organization
//!
//! - [`constants`] - Wire field names, fixed values and endpoint paths
//! - [`field`] - [`FieldSet`], the ordered collection of signable pairs
//! - [`enums`] - Verification verdicts and transaction outcomes
//! - [`transaction`] - Caller requests, engine responses and amount handling
//! - [`error`] - Field assembly errors
//!
//! # Example
//!
//! ```
//! use paygate_types::{FieldSet, Namespace};
//!
//! let mut fields = FieldSet::new();
//! fields.add("vpc_Command", "pay").unwrap();
//! fields.add_in(Namespace::Custom, "invoice", "INV-7").unwrap();
//!
//! // Canonical order is by name, insertion order is kept for rendering.
//! let canonical: Vec<_> = fields.canonical_pairs().map(|(k, _)| k).collect();
//! assert_eq!(canonical, vec!["user_invoice", "vpc_Command"]);
//! assert_eq!(fields.iter().next().unwrap().name(), "vpc_Command");
//! ```

/// Crate version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod constants;
pub mod enums;
pub mod error;
pub mod field;
pub mod transaction;

pub use enums::{TransactionOutcome, VerificationVerdict};
pub use error::{FieldError, FieldResult};
pub use field::{CanonicalPairs, Field, FieldSet, Namespace};
pub use transaction::{
    generate_request_code, MinorUnit, TransactionRequest, TransactionResponse,
    DEFAULT_REQUEST_CODE_LENGTH,
};
