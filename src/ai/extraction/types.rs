//! Wire types for the chat completions API and the records extracted from it

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One extracted form, keyed by field name in the order the model returned them
pub type ExtractionRecord = Map<String, Value>;

/// Key holding the source image file name
pub const IMAGE_FIELD: &str = "image";

/// Key holding the model-supplied confidence score
pub const CONFIDENCE_FIELD: &str = "confidence";

/// Field names the extraction prompt asks for, in CSV column order
pub const CANONICAL_FIELDS: [&str; 14] = [
    "first_name",
    "last_name",
    "email",
    "mobile",
    "address",
    "city",
    "state",
    "zip",
    "newsletter",
    "free_seminar_invitations",
    "consultation_appointment",
    "speaker_for_my_group",
    IMAGE_FIELD,
    CONFIDENCE_FIELD,
];

// API request/response types

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrlContent },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrlContent {
    pub url: String,
}

/// Decoded response envelope
///
/// `choices` and `usage` default to empty so a response missing them still
/// decodes; the parser then reports "no content" instead of the client
/// reporting a malformed envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Usage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

impl ChatResponse {
    /// Text of the first choice's message, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// Running sum of token usage for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTally {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl TokenTally {
    pub fn add(&mut self, usage: Usage) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(usage.prompt_tokens);
        self.completion_tokens = self
            .completion_tokens
            .saturating_add(usage.completion_tokens);
    }

    pub fn total(&self) -> u64 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}
