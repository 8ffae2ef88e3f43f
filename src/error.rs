//! Crate-wide error type
//!
//! Discovery errors are fatal to a batch. Everything that can go wrong for a
//! single file is converted into a [`FailureKind`] by the orchestrator and never
//! escapes the batch.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForminatorError>;

#[derive(Debug, Error)]
pub enum ForminatorError {
    /// Forms directory missing, unreadable, or not a directory
    #[error("cannot read forms directory {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("extraction request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("extraction API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),

    #[error("a batch is already running")]
    AlreadyRunning,

    #[error("batches must be started from within a tokio runtime")]
    NoRuntime,

    /// The background worker stopped without delivering a result
    #[error("batch aborted: {0}")]
    BatchAborted(String),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    InvalidInput(String),
}

/// Classification of a single file's failure inside a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Image could not be read from disk
    ImageRead,
    /// Network error or timeout
    Transport,
    /// Non-2xx response
    Status,
    /// Response body was not a chat completion envelope
    MalformedEnvelope,
    /// Envelope was fine but no JSON object could be extracted from the answer
    Unparseable,
    /// The worker processing the file stopped before finishing it
    Aborted,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImageRead => "image_read",
            Self::Transport => "transport",
            Self::Status => "status",
            Self::MalformedEnvelope => "malformed_envelope",
            Self::Unparseable => "unparseable",
            Self::Aborted => "aborted",
        }
    }
}

impl ForminatorError {
    /// Per-file classification, `None` for errors that are never per-file
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::ImageRead { .. } => Some(FailureKind::ImageRead),
            Self::Transport(_) => Some(FailureKind::Transport),
            Self::Status { .. } => Some(FailureKind::Status),
            Self::MalformedEnvelope(_) => Some(FailureKind::MalformedEnvelope),
            _ => None,
        }
    }
}
