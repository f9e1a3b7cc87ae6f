//! Client for the paygate redirect-and-callback payment protocol.
//!
//! A merchant backend uses [`GatewayClient`] to:
//!
//! 1. **Create a payment link**: a signed URL the browser is redirected to
//! 2. **Process a callback**: verify the gateway's signed reply and classify it
//! 3. **Query status**: ask the gateway directly when a callback never arrived
//!
//! Rejected or untrustworthy payments are reported through
//! [`TransactionOutcome`](paygate_types::TransactionOutcome), not through
//! errors. Callers branch on the outcome.
//!
//! # Example
//!
//! ```
//! use paygate_client::{GatewayClient, GatewayConfig, RequestOrigin};
//! use paygate_types::TransactionRequest;
//! use rust_decimal::Decimal;
//!
//! let config = GatewayConfig::sandbox("TESTONEPAY", "6BEB2546", "6D0870CDE5F24F34F3915FB0045120DB");
//! let client = GatewayClient::new(config).unwrap();
//!
//! let request = TransactionRequest::new("ORDER-42", Decimal::from(150000));
//! let origin = RequestOrigin::new("https", "shop.example.com");
//! let url = client
//!     .create_payment_link("order", &request, "https://shop.example.com/orders/42", &origin)
//!     .unwrap();
//! assert!(url.contains("vpc_Amount=15000000"));
//! ```
//!
//! # Module Organization
//!
//! - [`builder`] - Outbound field assembly and rendering
//! - [`verifier`] - Inbound parsing, signature checking and extraction
//! - [`outcome`] - Verdict and response code to outcome mapping
//! - [`client`] - The three public operations
//! - [`processor`] - Callback routing to merchant handlers
//! - [`transport`] - Status query transport seam

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod origin;
pub mod outcome;
pub mod processor;
pub mod transport;
pub mod verifier;

pub use builder::{build_payment_fields, build_query_fields, render_form, render_query, PaymentContext};
pub use client::{Callback, CallbackEndpoints, GatewayClient, StatusReport};
pub use config::{GatewayConfig, SignatureContext};
pub use error::{GatewayError, GatewayResult};
pub use origin::RequestOrigin;
pub use outcome::{classify, classify_response};
pub use processor::{CallbackDispatcher, CallbackKind, CallbackProcessor};
pub use transport::{flatten_json_object, HttpTransport, Transport};
pub use verifier::CheckedResponse;

// Re-export for convenience
pub use paygate_types::constants::NOTIFICATION_ACK;
