//! Completion tracking
//!
//! Counts finished files and fires the batch completion callback exactly once,
//! when the count reaches the batch size. Works the same for one worker or many.

use std::sync::{Arc, Mutex};

use super::aggregator::{AggregateSnapshot, ResultAggregator};

pub type CompletionCallback = Box<dyn FnOnce(AggregateSnapshot) + Send + 'static>;

struct TrackerState {
    completed: usize,
    on_complete: Option<CompletionCallback>,
}

pub struct CompletionTracker {
    expected: usize,
    aggregator: Arc<ResultAggregator>,
    state: Mutex<TrackerState>,
}

impl CompletionTracker {
    pub fn new(
        expected: usize,
        aggregator: Arc<ResultAggregator>,
        on_complete: CompletionCallback,
    ) -> Self {
        Self {
            expected,
            aggregator,
            state: Mutex::new(TrackerState {
                completed: 0,
                on_complete: Some(on_complete),
            }),
        }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn completed(&self) -> usize {
        self.lock().completed
    }

    pub fn is_complete(&self) -> bool {
        self.lock().on_complete.is_none()
    }

    /// Count one finished file, success or failure
    ///
    /// Returns `true` for the call that fired the completion callback.
    pub fn record_completion(&self) -> bool {
        let callback = {
            let mut state = self.lock();
            if state.completed >= self.expected {
                tracing::warn!(
                    "Completion recorded after batch finished ({} of {})",
                    state.completed + 1,
                    self.expected
                );
                return false;
            }
            state.completed += 1;
            tracing::debug!("Completed {}/{}", state.completed, self.expected);
            if state.completed == self.expected {
                state.on_complete.take()
            } else {
                None
            }
        };

        self.fire(callback)
    }

    /// Fire immediately for a batch with nothing to wait for
    pub fn complete_if_empty(&self) -> bool {
        if self.expected != 0 {
            return false;
        }
        let callback = self.lock().on_complete.take();
        self.fire(callback)
    }

    // The callback runs outside the lock so it may query the tracker
    fn fire(&self, callback: Option<CompletionCallback>) -> bool {
        match callback {
            Some(callback) => {
                callback(self.aggregator.snapshot());
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
