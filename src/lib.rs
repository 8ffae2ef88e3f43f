//! Forminator turns a directory of scanned form images into one CSV file.
//!
//! Each image is sent to an OpenAI-compatible vision model, the JSON object in
//! the answer becomes one record, and the records of a batch are exported
//! together.
//!
//! ```no_run
//! use std::sync::Arc;
//! use forminator::{ExtractionClient, ExtractionConfig, Orchestrator};
//!
//! # async fn demo() -> forminator::Result<()> {
//! let client = ExtractionClient::new(ExtractionConfig::new("sk-..."))?;
//! let result = Orchestrator::new(Arc::new(client))
//!     .run("/path/to/forms".as_ref(), None)
//!     .await?;
//! forminator::export::export_csv("contacts.csv".as_ref(), &result.records, false)?;
//! # Ok(())
//! # }
//! ```

pub mod ai;
pub mod batch;
pub mod error;
pub mod export;
pub mod settings;

pub use ai::extraction::{ExtractionClient, ExtractionConfig, ExtractionRecord, ExtractionService};
pub use batch::{BatchOptions, BatchResult, FailurePolicy, Orchestrator};
pub use error::{FailureKind, ForminatorError, Result};
