//! Form Extraction Pipeline
//!
//! ```text
//! image file ─► vision::encode_image ─► client::ExtractionClient ─► utils::parse_extraction
//!                 (data: URI)              (chat completion)          (fenced JSON object)
//! ```

pub mod client;
pub mod types;
pub mod utils;
pub mod vision;

pub use client::{ExtractionClient, ExtractionConfig, ExtractionService};
pub use types::{ChatResponse, ExtractionRecord, TokenTally, Usage, CANONICAL_FIELDS};
pub use utils::parse_extraction;
pub use vision::{encode_image, EncodedImage};
