//! The seam the session layer drives.

use async_trait::async_trait;
use chat_core::{GenerationOptions, Message};

use crate::client::ChatClient;
use crate::error::CompletionError;

/// Anything that can turn an ordered transcript into an assistant reply.
///
/// [`ChatClient`] is the production implementation; tests substitute
/// scripted fakes.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        messages: &[Message],
        options: GenerationOptions,
    ) -> Result<String, CompletionError>;
}

#[async_trait]
impl CompletionBackend for ChatClient {
    async fn complete(
        &self,
        messages: &[Message],
        options: GenerationOptions,
    ) -> Result<String, CompletionError> {
        ChatClient::complete(self, messages, options).await
    }
}
