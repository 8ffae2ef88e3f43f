//! Batch, task and result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::ai::extraction::types::{ExtractionRecord, TokenTally};
use crate::error::FailureKind;

/// Lifecycle of the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    /// No batch has been started yet
    Idle,
    Running,
    /// The last batch delivered its result
    Completed,
}

/// What the records list gets for a file that produced no usable data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Append a record holding only the image name, one row per source image
    #[default]
    Placeholder,
    /// Append nothing
    Skip,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown failure policy '{}', expected 'placeholder' or 'skip'",
                other
            )),
        }
    }
}

/// Tunables for one orchestrator
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Number of files in flight at once, 1 processes files one at a time
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            failure_policy: FailurePolicy::Placeholder,
        }
    }
}

/// Files discovered by one directory scan
#[derive(Debug, Clone)]
pub struct Batch {
    pub id: Uuid,
    pub directory: PathBuf,
    files: Vec<PathBuf>,
    pub created_at: DateTime<Utc>,
}

impl Batch {
    pub fn new(directory: &Path, files: Vec<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            directory: directory.to_path_buf(),
            files,
            created_at: Utc::now(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// One pending task per file, in discovery order
    pub fn tasks(&self) -> Vec<FileTask> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, path)| FileTask::new(index, path.clone()))
            .collect()
    }
}

/// How a task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failure(FailureKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Dispatched,
    Completed(TaskOutcome),
}

/// One image file and where it is in its lifecycle
#[derive(Debug, Clone)]
pub struct FileTask {
    pub index: usize,
    pub path: PathBuf,
    state: TaskState,
}

impl FileTask {
    pub fn new(index: usize, path: PathBuf) -> Self {
        Self {
            index,
            path,
            state: TaskState::Pending,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// File name used in prompts, records and progress messages
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    pub fn dispatch(&mut self) {
        debug_assert_eq!(self.state, TaskState::Pending);
        self.state = TaskState::Dispatched;
    }

    pub fn complete(&mut self, outcome: TaskOutcome) {
        debug_assert!(!matches!(self.state, TaskState::Completed(_)));
        self.state = TaskState::Completed(outcome);
    }
}

/// A file that produced no usable record, and why
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

/// Everything a batch produced, delivered once to the completion sink
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub directory: PathBuf,
    pub file_count: usize,
    /// In completion order
    pub records: Vec<ExtractionRecord>,
    pub tokens: TokenTally,
    pub failures: Vec<FileFailure>,
    /// Every task in its final state, in completion order
    pub tasks: Vec<FileTask>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.file_count.saturating_sub(self.failures.len())
    }
}
