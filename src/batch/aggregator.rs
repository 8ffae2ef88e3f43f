//! Result aggregation
//!
//! Records, token usage and failures for one batch live behind a single lock
//! so concurrent workers never lose an update. Nothing is removed or rewritten
//! once appended.

use std::sync::Mutex;

use super::types::{FileFailure, FileTask};
use crate::ai::extraction::types::{ExtractionRecord, TokenTally, Usage};

/// Point-in-time copy of everything aggregated so far
#[derive(Debug, Clone, Default)]
pub struct AggregateSnapshot {
    pub records: Vec<ExtractionRecord>,
    pub tokens: TokenTally,
    pub failures: Vec<FileFailure>,
    pub tasks: Vec<FileTask>,
}

#[derive(Debug, Default)]
pub struct ResultAggregator {
    inner: Mutex<AggregateSnapshot>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parsed record and count the tokens spent on it
    pub fn record_success(&self, record: ExtractionRecord, usage: Usage) {
        let mut inner = self.lock();
        inner.tokens.add(usage);
        inner.records.push(record);
    }

    /// Register a failed file, optionally with a stand-in record
    pub fn record_failure(&self, failure: FileFailure, placeholder: Option<ExtractionRecord>) {
        let mut inner = self.lock();
        if let Some(record) = placeholder {
            inner.records.push(record);
        }
        inner.failures.push(failure);
    }

    /// Keep a finished task so its final state reaches the batch result
    pub fn record_task(&self, task: FileTask) {
        self.lock().tasks.push(task);
    }

    pub fn tokens(&self) -> TokenTally {
        self.lock().tokens
    }

    pub fn snapshot(&self) -> AggregateSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AggregateSnapshot> {
        // A panicking writer cannot leave a half-appended entry behind
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
