//! Extraction API Client
//!
//! Sends one chat completion request per form image to an OpenAI-compatible
//! endpoint. Failures are returned to the caller untouched; there is no retry
//! loop, the orchestrator decides what a failed file means for the batch.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::types::{ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrlContent};
use super::vision::EncodedImage;
use crate::ai::http_client::{build_client, extraction_client, DEFAULT_TIMEOUT};
use crate::error::{ForminatorError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Connection and request settings for the extraction API
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub api_key: String,
    /// Scheme and host, without the `/v1/...` path
    pub base_url: String,
    pub model: String,
    /// Ceiling on completion tokens per image
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl ExtractionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Anything that can turn a prompt plus an image into a chat completion
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract(&self, prompt: &str, image: &EncodedImage) -> Result<ChatResponse>;
}

/// HTTP implementation of [`ExtractionService`]
pub struct ExtractionClient {
    client: Client,
    config: ExtractionConfig,
}

impl ExtractionClient {
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ForminatorError::InvalidInput(
                "an API key is required".to_string(),
            ));
        }

        let client = if config.timeout == DEFAULT_TIMEOUT {
            extraction_client().clone()
        } else {
            build_client(config.timeout)?
        };

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Request body for one image
    pub fn build_request(&self, prompt: &str, image: &EncodedImage) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrlContent {
                            url: image.data_url(),
                        },
                    },
                ],
            }],
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl ExtractionService for ExtractionClient {
    async fn extract(&self, prompt: &str, image: &EncodedImage) -> Result<ChatResponse> {
        let request = self.build_request(prompt, image);

        tracing::debug!(
            "Sending extraction request to model {} ({} base64 bytes)",
            self.config.model,
            image.base64.len()
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForminatorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<ChatResponse>(&text)
            .map_err(|e| ForminatorError::MalformedEnvelope(e.to_string()))
    }
}
