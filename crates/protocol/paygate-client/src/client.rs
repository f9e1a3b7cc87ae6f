//! Gateway client.
//!
//! Ties field assembly, signing, verification and classification into the
//! three operations a merchant backend needs:
//!
//! 1. [`create_payment_link`](GatewayClient::create_payment_link) - signed redirect URL
//! 2. [`process_callback`](GatewayClient::process_callback) - verify and classify a callback
//! 3. [`query_status`](GatewayClient::query_status) - signed out-of-band status query
//!
//! [`handle_return`](GatewayClient::handle_return) and
//! [`handle_notification`](GatewayClient::handle_notification) wrap callback
//! processing with dispatch to the merchant's [`CallbackProcessor`]s.
//!
//! [`CallbackProcessor`]: crate::processor::CallbackProcessor
//!
//! Every operation is stateless; a single client can serve concurrent calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use paygate_types::constants::NOTIFICATION_ACK;
use paygate_types::{
    FieldSet, TransactionOutcome, TransactionRequest, TransactionResponse, VerificationVerdict,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::builder::{
    build_payment_fields, build_query_fields, render_form, render_query, PaymentContext,
};
use crate::config::{GatewayConfig, SignatureContext};
use crate::error::GatewayResult;
use crate::origin::RequestOrigin;
use crate::outcome::classify_response;
use crate::processor::{CallbackDispatcher, CallbackKind};
use crate::transport::{HttpTransport, Transport};
use crate::verifier::{parse, parse_query_string, CheckedResponse};

/// A processed gateway callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Callback {
    /// Transaction type declared in the payload.
    ///
    /// Suitable for routing only; trust it as far as [`verdict`](Self::verdict) allows.
    pub transaction_type: Option<String>,

    pub response: TransactionResponse,

    pub verdict: VerificationVerdict,

    /// Caller return URL, present only when the payload verified.
    pub return_url: Option<String>,
}

/// Result of an out-of-band status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub outcome: TransactionOutcome,

    /// Lets callers tell a tampered reply from an unsigned one.
    pub verdict: VerificationVerdict,

    /// Gateway fields of the reply, prefix stripped.
    pub gateway_data: BTreeMap<String, String>,
}

/// Absolute URLs the gateway calls back on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackEndpoints {
    /// Browser redirect target, sent with every payment link.
    pub return_url: String,
    /// Server-to-server notification target, registered with the gateway.
    pub notification_url: String,
}

/// Client for the redirect-and-callback payment protocol.
#[derive(Clone)]
pub struct GatewayClient {
    config: GatewayConfig,
    context: SignatureContext,
    transport: Arc<dyn Transport>,
}

impl GatewayClient {
    /// Create a client using the HTTPS transport.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let transport = HttpTransport::from_config(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client with a custom transport.
    pub fn with_transport(config: GatewayConfig, transport: Arc<dyn Transport>) -> GatewayResult<Self> {
        let context = SignatureContext::from_config(&config)?;
        Ok(Self {
            config,
            context,
            transport,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn context(&self) -> &SignatureContext {
        &self.context
    }

    /// Resolve the configured callback paths against `origin`.
    pub fn callback_endpoints(&self, origin: &RequestOrigin) -> GatewayResult<CallbackEndpoints> {
        Ok(CallbackEndpoints {
            return_url: origin.absolute_url(&self.config.return_path)?,
            notification_url: origin.absolute_url(&self.config.ipn_path)?,
        })
    }

    /// Build the signed URL the browser is redirected to.
    ///
    /// The gateway sends the browser back to the configured return path on
    /// `origin`; `return_url` travels along and is handed back by
    /// [`process_callback`](Self::process_callback) once verified.
    pub fn create_payment_link(
        &self,
        transaction_type: &str,
        request: &TransactionRequest,
        return_url: &str,
        origin: &RequestOrigin,
    ) -> GatewayResult<String> {
        self.config.validate_for_payment()?;

        let context = PaymentContext {
            transaction_type: transaction_type.to_string(),
            return_url: return_url.to_string(),
            callback_url: self.callback_endpoints(origin)?.return_url,
            client_ip: origin.client_ip.clone(),
        };
        let fields = build_payment_fields(request, &self.config, &context)?;
        let url = format!(
            "{}?{}",
            self.context.payment_endpoint(),
            render_query(&fields, self.context.secret())
        );

        info!(
            request_code = %request.request_code,
            order_code = %request.order_code,
            transaction_type = %transaction_type,
            "Created payment link"
        );
        Ok(url)
    }

    /// Verify and classify a callback given as name/value pairs.
    pub fn process_callback<I, K, V>(&self, pairs: I) -> GatewayResult<Callback>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(self.handle_callback(parse(pairs)?))
    }

    /// Verify and classify a callback given as a raw query string.
    pub fn process_callback_query(&self, raw: &str) -> GatewayResult<Callback> {
        Ok(self.handle_callback(parse_query_string(raw)?))
    }

    fn handle_callback(&self, fields: FieldSet) -> Callback {
        let checked = CheckedResponse::check(fields, self.context.secret());
        let response = classify_response(&checked);

        info!(
            request_code = %response.request_code,
            verdict = %checked.verdict(),
            outcome = %response.outcome,
            "Processed gateway callback"
        );

        Callback {
            transaction_type: checked.transaction_type().map(str::to_string),
            verdict: checked.verdict(),
            return_url: checked.trusted_return_url().map(str::to_string),
            response,
        }
    }

    /// Process a browser return and run the matching processors.
    ///
    /// Redirect the browser to [`Callback::return_url`] afterwards, which is
    /// only set for verified payloads.
    pub async fn handle_return<I, K, V>(
        &self,
        pairs: I,
        dispatcher: &CallbackDispatcher,
    ) -> GatewayResult<Callback>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let callback = self.process_callback(pairs)?;
        dispatcher.dispatch(CallbackKind::Return, &callback).await;
        Ok(callback)
    }

    /// Process a server-to-server notification and run the matching processors.
    ///
    /// Returns the callback together with the acknowledgement body the
    /// gateway expects in reply.
    pub async fn handle_notification<I, K, V>(
        &self,
        pairs: I,
        dispatcher: &CallbackDispatcher,
    ) -> GatewayResult<(Callback, &'static str)>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let callback = self.process_callback(pairs)?;
        dispatcher.dispatch(CallbackKind::Notification, &callback).await;
        Ok((callback, NOTIFICATION_ACK))
    }

    /// Ask the gateway for the current state of `request_code`.
    ///
    /// Transport failures are returned as errors without classification.
    /// Nothing is retried.
    pub async fn query_status(&self, request_code: &str) -> GatewayResult<StatusReport> {
        self.config.validate_for_query()?;

        let fields = build_query_fields(request_code, &self.config)?;
        let form = render_form(&fields, self.context.secret());
        debug!(request_code = %request_code, "Querying transaction status");

        let reply = self
            .transport
            .post_form(self.context.query_endpoint(), &form)
            .await
            .map_err(|e| {
                warn!(request_code = %request_code, error = %e, "Status query failed");
                e
            })?;

        let checked = CheckedResponse::check(parse(reply)?, self.context.secret());
        let response = classify_response(&checked);

        info!(
            request_code = %request_code,
            verdict = %checked.verdict(),
            outcome = %response.outcome,
            "Queried transaction status"
        );

        Ok(StatusReport {
            outcome: response.outcome,
            verdict: checked.verdict(),
            gateway_data: response.gateway_data,
        })
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("config", &self.config)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
