//! Wire types for the chat-completions endpoint.

use chat_core::{GenerationOptions, Message, Role};
use serde::{Deserialize, Serialize};

/// One `{role, content}` pair as the endpoint expects it.
///
/// Built from [`Message`]; ids and timestamps stay local.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    /// Build a request that sends `messages` in their transcript order.
    pub fn new(model: impl Into<String>, messages: &[Message], options: GenerationOptions) -> Self {
        Self {
            model: model.into(),
            messages: messages.iter().map(ChatMessage::from).collect(),
            temperature: options.temperature(),
            max_tokens: options.max_tokens(),
        }
    }
}

/// Response body of `POST /chat/completions`, reduced to the fields this
/// client reads. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
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
