//! Routing processed callbacks to merchant handlers.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::Callback;

/// How a callback reached the merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackKind {
    /// Browser redirect back from the gateway.
    Return,
    /// Server-to-server notification.
    Notification,
}

/// Merchant-side handler for processed callbacks.
///
/// Handlers see every outcome, not just successes, and are responsible for
/// their own deduplication: the same transaction may arrive through both
/// kinds of callback. The declared transaction type of an unverified payload
/// is attacker-controlled; check [`Callback::verdict`] before acting on it.
#[async_trait]
pub trait CallbackProcessor: Send + Sync {
    /// Transaction type this processor handles. `None` handles every type.
    fn transaction_type(&self) -> Option<&str> {
        None
    }

    async fn on_return(&self, _callback: &Callback) {}

    async fn on_notification(&self, _callback: &Callback) {}
}

/// Fans a processed callback out to the matching processors.
#[derive(Clone, Default)]
pub struct CallbackDispatcher {
    processors: Vec<Arc<dyn CallbackProcessor>>,
}

impl CallbackDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, processor: Arc<dyn CallbackProcessor>) {
        self.processors.push(processor);
    }

    pub fn with_processor(mut self, processor: Arc<dyn CallbackProcessor>) -> Self {
        self.register(processor);
        self
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Invoke every processor whose filter accepts the callback's declared type.
    ///
    /// Routing ignores the verdict: tampered and unsigned callbacks are
    /// dispatched too, so processors can record them. Returns how many
    /// processors ran.
    pub async fn dispatch(&self, kind: CallbackKind, callback: &Callback) -> usize {
        let declared = callback.transaction_type.as_deref();
        let mut handled = 0;
        for processor in &self.processors {
            if let Some(wanted) = processor.transaction_type() {
                if Some(wanted) != declared {
                    continue;
                }
            }
            match kind {
                CallbackKind::Return => processor.on_return(callback).await,
                CallbackKind::Notification => processor.on_notification(callback).await,
            }
            handled += 1;
        }
        debug!(
            kind = ?kind,
            transaction_type = ?declared,
            handled,
            "Dispatched callback"
        );
        handled
    }
}
