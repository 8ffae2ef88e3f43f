//! Vision utilities for form extraction
//!
//! Turns an image file into an inline `data:` URI for the chat completions API.
//! Images are sent as-is, no resizing or re-encoding.

use base64::Engine;
use std::path::Path;

use crate::error::{ForminatorError, Result};

/// Used when the extension does not map to an image MIME type
const FALLBACK_MIME: &str = "image/jpeg";

/// An image ready to embed in a request body
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Standard padded base64 of the raw file bytes
    pub base64: String,
}

impl EncodedImage {
    pub fn from_bytes(data: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64: base64::engine::general_purpose::STANDARD.encode(data),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Check if a file extension is a form image we can submit
pub fn is_image_extension(ext: Option<&str>) -> bool {
    match ext {
        Some(e) => matches!(e.to_lowercase().as_str(), "jpg" | "jpeg" | "png"),
        None => false,
    }
}

/// Guess the MIME type from the file extension
pub fn image_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_MIME.to_string())
}

/// Read an image file and base64-encode it
pub async fn encode_image(path: &Path) -> Result<EncodedImage> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| ForminatorError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Encoded {} ({} bytes)", path.display(), data.len());
    Ok(EncodedImage::from_bytes(&data, image_mime_type(path)))
}
