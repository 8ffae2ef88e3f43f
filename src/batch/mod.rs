//! Batch processing of a forms directory

pub mod aggregator;
pub mod collector;
pub mod orchestrator;
pub mod tracker;
pub mod types;

pub use aggregator::{AggregateSnapshot, ResultAggregator};
pub use collector::collect_image_files;
pub use orchestrator::{Orchestrator, ProgressReporter, ProgressSender};
pub use tracker::CompletionTracker;
pub use types::{
    Batch, BatchOptions, BatchResult, BatchState, FailurePolicy, FileFailure, FileTask,
    TaskOutcome, TaskState,
};
