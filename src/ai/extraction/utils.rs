//! Response parsing
//!
//! The model is asked for a JSON object and answers with it inside a fenced
//! code block. Parsing is structural only: values are never validated, and any
//! failure yields `None` so the caller can keep its per-file accounting intact.

use serde_json::Value;

use super::types::{ChatResponse, ExtractionRecord};

const FENCE: &str = "```";
const LANGUAGE_TAG: &str = "json";

/// Return the text following the first code fence, minus a leading `json` tag
///
/// Only the segment between the first and second fence is returned. With a
/// single fence the rest of the content is used.
pub fn extract_fenced_json(content: &str) -> Option<&str> {
    let mut segments = content.splitn(3, FENCE);
    segments.next()?;
    let block = segments.next()?;

    let block = block.trim_start();
    let block = match block.get(..LANGUAGE_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(LANGUAGE_TAG) => &block[LANGUAGE_TAG.len()..],
        _ => block,
    };

    Some(block.trim())
}

/// Extract the JSON object embedded in the first choice of a response
pub fn parse_extraction(response: &ChatResponse) -> Option<ExtractionRecord> {
    let Some(content) = response.first_content() else {
        tracing::warn!("Response has no message content");
        return None;
    };

    let Some(json_str) = extract_fenced_json(content) else {
        tracing::warn!("No code block found in response ({} chars)", content.len());
        return None;
    };

    match serde_json::from_str::<Value>(json_str) {
        Ok(Value::Object(record)) => Some(record),
        Ok(other) => {
            tracing::warn!("Expected a JSON object, got {}", json_kind(&other));
            None
        }
        Err(e) => {
            tracing::warn!("Error parsing JSON: {}", e);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
