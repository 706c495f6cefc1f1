//! Shared fakes for notification integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use carepanel_cache::memory::MemoryTokenStore;
use carepanel_notify::{FixedPermission, HttpPushProvider, PermissionDecision, TokenLifecycle};
use carepanel_transport::{Method, Transport, TransportError, TransportResponse};

/// One request seen by [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// In-process transport answering from per-path reply queues.
///
/// Paths without a queued reply answer `404`.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Result<TransportResponse, TransportError>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply for the next request to `path`.
    pub fn on(&self, path: &str, reply: Result<TransportResponse, TransportError>) {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Queue a JSON reply with `status`.
    pub fn reply(&self, path: &str, status: u16, body: Value) {
        self.on(path, Ok(TransportResponse::new(status, body)));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.path == path)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.replies
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Ok(TransportResponse::new(404, Value::Null)))
    }
}

pub const TOKENS_PATH: &str = "/push/tokens";
pub const DISPATCH_PATH: &str = "/push/notifications";
pub const PUBLIC_KEY: &str = "BPub-test";

/// A lifecycle wired to `transport` through the HTTP provider.
pub fn lifecycle(
    transport: Arc<ScriptedTransport>,
    decision: PermissionDecision,
) -> Arc<TokenLifecycle> {
    let provider = HttpPushProvider::new(
        transport,
        TOKENS_PATH,
        Arc::new(FixedPermission(decision)),
    );
    Arc::new(TokenLifecycle::new(
        Arc::new(provider),
        Arc::new(MemoryTokenStore::new()),
        PUBLIC_KEY,
    ))
}
