//! Mock implementation of the `Transport` trait for testing.
//!
//! Replays scripted gateway replies in order and records every form posted,
//! so tests can assert on what the client sent without touching the network.

use async_trait::async_trait;
use paygate_client::{GatewayError, GatewayResult, Transport};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

/// One scripted gateway reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Reply with these pairs.
    Pairs(Vec<(String, String)>),
    /// Reply with the posted form, unchanged.
    Echo,
    /// Fail with a non-success HTTP status.
    Status { status: u16, body: String },
    /// Fail as if the network was unreachable.
    Network(String),
}

/// A form posted through the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub form: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a posted field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

struct MockTransportInner {
    /// Replies consumed front to back.
    replies: VecDeque<MockReply>,
    /// Reply used once the script runs out.
    fallback: Option<MockReply>,
    /// Record of all posted forms.
    requests: Vec<RecordedRequest>,
}

/// A mock implementation of the `Transport` trait for testing.
///
/// Uses `Arc<RwLock<...>>` internally, so it is cheap to clone and all
/// clones share the same script and request log.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<RwLock<MockTransportInner>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a mock with no scripted replies.
    ///
    /// Unscripted calls fail with a transport error.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockTransportInner {
                replies: VecDeque::new(),
                fallback: None,
                requests: Vec::new(),
            })),
        }
    }

    /// Queue a reply.
    pub fn with_reply(self, reply: MockReply) -> Self {
        self.inner.write().unwrap().replies.push_back(reply);
        self
    }

    /// Queue a reply made of `pairs`.
    pub fn with_pairs<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let pairs = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.with_reply(MockReply::Pairs(pairs))
    }

    /// Echo every posted form back.
    pub fn echoing(self) -> Self {
        self.inner.write().unwrap().fallback = Some(MockReply::Echo);
        self
    }

    /// Fail every call with the given HTTP status.
    pub fn with_status(self, status: u16, body: &str) -> Self {
        self.inner.write().unwrap().fallback = Some(MockReply::Status {
            status,
            body: body.to_string(),
        });
        self
    }

    /// Fail every call with a network error.
    pub fn with_failure(self) -> Self {
        self.inner.write().unwrap().fallback =
            Some(MockReply::Network("connection refused".to_string()));
        self
    }

    // =========================================================================
    // Assertion Helpers
    // =========================================================================

    /// Get all posted forms.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.read().unwrap().requests.clone()
    }

    /// Get the number of calls made.
    pub fn request_count(&self) -> usize {
        self.inner.read().unwrap().requests.len()
    }

    /// Get the most recent posted form.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.inner.read().unwrap().requests.last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> GatewayResult<Vec<(String, String)>> {
        let reply = {
            let mut inner = self.inner.write().unwrap();
            inner.requests.push(RecordedRequest {
                url: url.to_string(),
                form: form.to_vec(),
            });
            inner.replies.pop_front().or_else(|| inner.fallback.clone())
        };

        match reply {
            Some(MockReply::Pairs(pairs)) => Ok(pairs),
            Some(MockReply::Echo) => Ok(form.to_vec()),
            Some(MockReply::Status { status, body }) => {
                Err(GatewayError::TransportStatus { status, body })
            }
            Some(MockReply::Network(reason)) => Err(GatewayError::Transport(reason)),
            None => Err(GatewayError::Transport("no scripted reply".to_string())),
        }
    }
}
