//! Bounded in-memory log of dispatch outcomes.

use std::collections::VecDeque;
use std::sync::Mutex;

use carepanel_core::types::DispatchRecord;

/// Most recent dispatch outcomes, oldest evicted first. Never persisted.
#[derive(Debug)]
pub struct DispatchHistory {
    limit: usize,
    records: Mutex<VecDeque<DispatchRecord>>,
}

impl DispatchHistory {
    /// Keep at most `limit` records (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            records: Mutex::new(VecDeque::with_capacity(limit)),
        }
    }

    /// Append a record, evicting the oldest if full.
    pub fn push(&self, record: DispatchRecord) {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if records.len() == self.limit {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Records newest first.
    pub fn recent(&self) -> Vec<DispatchRecord> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.iter().rev().cloned().collect()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether no submission has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
