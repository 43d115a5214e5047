//! The chat-completions call.

use chat_core::{GenerationOptions, Message};
use log::debug;
use reqwest::Client;

use crate::error::CompletionError;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Model requests are pinned to unless overridden.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano-2025-04-14";

/// Non-streaming chat-completions client.
///
/// [`complete`](ChatClient::complete) sends the whole transcript and
/// suspends until the endpoint answers or fails. There is no retry and no
/// request timeout beyond the transport's own; the caller sees exactly one
/// request per call.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the client at a different endpoint, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The model identifier requests are sent with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `messages` in order and return the assistant's reply text.
    pub async fn complete(
        &self,
        messages: &[Message],
        options: GenerationOptions,
    ) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest::new(self.model.as_str(), messages, options);
        debug!(
            "sending {} message(s) to {} (temperature {}, max_tokens {})",
            request.messages.len(),
            self.base_url,
            request.temperature,
            request.max_tokens
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(CompletionError::Api { status, body });
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
        reply_text(completion)
    }
}

/// First choice's message content, or the typed absence error.
fn reply_text(completion: ChatCompletionResponse) -> Result<String, CompletionError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyCompletion)
}
