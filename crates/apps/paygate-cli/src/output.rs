//! Command output types and rendering.

use colored::Colorize;
use paygate_client::{Callback, CallbackEndpoints, StatusReport};
use paygate_types::{TransactionOutcome, VerificationVerdict};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Something a command prints.
pub trait Render: Serialize {
    /// Human-readable form.
    fn render_human(&self) -> String;

    /// Render in the requested format.
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.render_human(),
            OutputFormat::Json => serde_json::to_string_pretty(self)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        }
    }
}

fn outcome_label(outcome: TransactionOutcome) -> String {
    match outcome {
        TransactionOutcome::Succeeded => outcome.as_str().green().bold().to_string(),
        TransactionOutcome::Failed => outcome.as_str().red().bold().to_string(),
        TransactionOutcome::Pending => outcome.as_str().yellow().bold().to_string(),
    }
}

fn verdict_label(verdict: VerificationVerdict) -> String {
    match verdict {
        VerificationVerdict::Verified => verdict.as_str().green().to_string(),
        VerificationVerdict::Tampered => verdict.as_str().red().to_string(),
        VerificationVerdict::Absent => verdict.as_str().yellow().to_string(),
    }
}

fn push_map(out: &mut Vec<String>, title: &str, map: &BTreeMap<String, String>) {
    if map.is_empty() {
        return;
    }
    out.push(format!("{}:", title.bold()));
    for (key, value) in map {
        out.push(format!("  {} = {}", key, value));
    }
}

// =============================================================================
// Payment Links
// =============================================================================

/// Output of `paygate link`.
#[derive(Debug, Clone, Serialize)]
pub struct LinkOutput {
    pub url: String,
    pub request_code: String,
    pub order_code: String,
    pub amount: Decimal,
}

impl Render for LinkOutput {
    fn render_human(&self) -> String {
        [
            format!("{} {}", "Request code:".bold(), self.request_code),
            format!("{} {}", "Order code:".bold(), self.order_code),
            format!("{} {}", "Amount:".bold(), self.amount),
            format!("{} {}", "Payment URL:".bold(), self.url.cyan()),
        ]
        .join("\n")
    }
}

// =============================================================================
// Callbacks
// =============================================================================

/// Output of `paygate callback`.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackOutput {
    pub outcome: TransactionOutcome,
    pub verdict: VerificationVerdict,
    pub request_code: String,
    pub order_code: String,
    pub amount: Decimal,
    pub transaction_type: Option<String>,
    pub return_url: Option<String>,
    pub data: BTreeMap<String, String>,
    pub gateway_data: BTreeMap<String, String>,
    /// Reply body for a server-to-server notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ack: Option<String>,
}

impl CallbackOutput {
    pub fn with_ack(mut self, ack: &str) -> Self {
        self.ack = Some(ack.to_string());
        self
    }
}

impl From<Callback> for CallbackOutput {
    fn from(callback: Callback) -> Self {
        let response = callback.response;
        Self {
            outcome: response.outcome,
            verdict: callback.verdict,
            request_code: response.request_code,
            order_code: response.order_code,
            amount: response.amount,
            transaction_type: callback.transaction_type,
            return_url: callback.return_url,
            data: response.data,
            gateway_data: response.gateway_data,
            ack: None,
        }
    }
}

impl Render for CallbackOutput {
    fn render_human(&self) -> String {
        let mut out = vec![
            format!("{} {}", "Outcome:".bold(), outcome_label(self.outcome)),
            format!("{} {}", "Signature:".bold(), verdict_label(self.verdict)),
            format!("{} {}", "Request code:".bold(), self.request_code),
            format!("{} {}", "Order code:".bold(), self.order_code),
            format!("{} {}", "Amount:".bold(), self.amount),
        ];
        if let Some(kind) = &self.transaction_type {
            out.push(format!("{} {}", "Type:".bold(), kind));
        }
        if let Some(url) = &self.return_url {
            out.push(format!("{} {}", "Return URL:".bold(), url));
        }
        push_map(&mut out, "Custom data", &self.data);
        push_map(&mut out, "Gateway data", &self.gateway_data);
        if let Some(ack) = &self.ack {
            out.push(format!("{} {}", "Reply:".bold(), ack));
        }
        out.join("\n")
    }
}

// =============================================================================
// Endpoints
// =============================================================================

/// Output of `paygate endpoints`.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointsOutput {
    pub return_url: String,
    pub notification_url: String,
}

impl From<CallbackEndpoints> for EndpointsOutput {
    fn from(endpoints: CallbackEndpoints) -> Self {
        Self {
            return_url: endpoints.return_url,
            notification_url: endpoints.notification_url,
        }
    }
}

impl Render for EndpointsOutput {
    fn render_human(&self) -> String {
        [
            format!("{} {}", "Return URL:".bold(), self.return_url),
            format!("{} {}", "Notification URL:".bold(), self.notification_url),
        ]
        .join("\n")
    }
}

// =============================================================================
// Status Queries
// =============================================================================

/// Output of `paygate query`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    pub request_code: String,
    pub outcome: TransactionOutcome,
    pub verdict: VerificationVerdict,
    pub gateway_data: BTreeMap<String, String>,
}

impl StatusOutput {
    pub fn new(request_code: &str, report: StatusReport) -> Self {
        Self {
            request_code: request_code.to_string(),
            outcome: report.outcome,
            verdict: report.verdict,
            gateway_data: report.gateway_data,
        }
    }
}

impl Render for StatusOutput {
    fn render_human(&self) -> String {
        let mut out = vec![
            format!("{} {}", "Request code:".bold(), self.request_code),
            format!("{} {}", "Outcome:".bold(), outcome_label(self.outcome)),
            format!("{} {}", "Signature:".bold(), verdict_label(self.verdict)),
        ];
        push_map(&mut out, "Gateway data", &self.gateway_data);
        out.join("\n")
    }
}

// =============================================================================
// Request Codes
// =============================================================================

/// Output of `paygate request-code`.
#[derive(Debug, Clone, Serialize)]
pub struct RequestCodeOutput {
    pub request_code: String,
}

impl Render for RequestCodeOutput {
    fn render_human(&self) -> String {
        self.request_code.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_code_render() {
        let output = RequestCodeOutput {
            request_code: "ABC123".into(),
        };
        assert_eq!(output.render(OutputFormat::Human), "ABC123");
        assert!(output
            .render(OutputFormat::Json)
            .contains("\"request_code\": \"ABC123\""));
    }

    #[test]
    fn test_status_render() {
        let mut gateway_data = BTreeMap::new();
        gateway_data.insert("TxnResponseCode".to_string(), "0".to_string());
        let output = StatusOutput {
            request_code: "REQ1".into(),
            outcome: TransactionOutcome::Pending,
            verdict: VerificationVerdict::Tampered,
            gateway_data,
        };
        let human = output.render(OutputFormat::Human);
        assert!(human.contains("REQ1"));
        assert!(human.contains("TxnResponseCode = 0"));

        let json = output.render(OutputFormat::Json);
        assert!(json.contains("\"outcome\": \"pending\""));
        assert!(json.contains("\"verdict\": \"tampered\""));
    }
}
