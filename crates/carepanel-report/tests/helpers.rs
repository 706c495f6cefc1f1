//! Shared test helpers for report integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::oneshot;

use carepanel_core::types::ReportRow;
use carepanel_report::ReportFetcher;
use carepanel_transport::{Method, Transport, TransportError, TransportResponse};

pub const REPORT_PATH: &str = "/reports/productivity/query";
pub const PAGE_SIZE: u64 = 10;

type Reply = Result<TransportResponse, TransportError>;

/// Transport whose responses are released by the test, keyed by page index.
///
/// A request for a page with no registered gate waits forever, so tests must
/// open a gate for every page they expect to be requested.
#[derive(Default)]
pub struct GatedTransport {
    gates: Mutex<HashMap<u64, oneshot::Receiver<Reply>>>,
    bodies: Mutex<Vec<Value>>,
}

impl GatedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a gate for `page_index`; the request resolves when the
    /// returned [`Gate`] is released.
    pub fn gate(&self, page_index: u64) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(page_index, rx);
        Gate(tx)
    }

    /// Register an already-released gate answering with `rows` of `total`.
    pub fn ready(&self, page_index: u64, rows: usize, total: u64) {
        self.gate(page_index).page(page_index, rows, total);
    }

    /// Request bodies in send order.
    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u64> {
        self.bodies()
            .iter()
            .filter_map(|body| body["pageIndex"].as_u64())
            .collect()
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, _method: Method, path: &str, body: Option<&Value>) -> Reply {
        assert_eq!(path, REPORT_PATH);
        let body = body.cloned().unwrap_or(Value::Null);
        let page_index = body["pageIndex"].as_u64().unwrap_or_default();
        self.bodies.lock().unwrap().push(body);

        let gate = self.gates.lock().unwrap().remove(&page_index);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".into()))),
            None => std::future::pending().await,
        }
    }
}

/// Releases one gated response.
pub struct Gate(oneshot::Sender<Reply>);

impl Gate {
    pub fn reply(self, reply: Reply) {
        let _ = self.0.send(reply);
    }

    /// Answer with a page of generated rows.
    pub fn page(self, page_index: u64, rows: usize, total: u64) {
        self.reply(Ok(TransportResponse::new(200, page_body(page_index, rows, total))));
    }

    pub fn fail(self, status: u16) {
        self.reply(Ok(TransportResponse::new(status, json!({"error": "boom"}))));
    }
}

/// Wait until the fetcher has no outstanding request for its newest sequence.
pub async fn settle(fetcher: &ReportFetcher) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while fetcher.snapshot().loading {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("fetcher still loading");
}

pub fn row(id: &str) -> ReportRow {
    ReportRow {
        patient_id: id.to_string(),
        patient_name: format!("Patient {id}"),
        city: "Recife".into(),
        health_plan: "Unimed".into(),
        consultations: 1,
        home_visits: 0,
        procedures: 0,
        follow_ups: 0,
        teleconsultations: 0,
    }
}

/// Response body whose row ids encode the page they belong to.
pub fn page_body(page_index: u64, rows: usize, total: u64) -> Value {
    let rows: Vec<ReportRow> = (0..rows)
        .map(|i| row(&format!("p{page_index}-{i}")))
        .collect();
    json!({"rows": rows, "totalCount": total})
}

pub fn fetcher(transport: Arc<GatedTransport>) -> ReportFetcher {
    ReportFetcher::new(transport, REPORT_PATH, PAGE_SIZE)
}
