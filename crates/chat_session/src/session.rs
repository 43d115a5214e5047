//! The session object and its builder.

use std::path::PathBuf;
use std::sync::Arc;

use chat_core::{resolve_api_key, GenerationOptions, SystemPromptPreset, Transcript};
use completion_client::{ChatClient, CompletionBackend, DEFAULT_MODEL};
use log::{debug, warn};
use token_budget::{enforce_budget, SharedTokenCounter, TiktokenCounter};

use crate::error::SessionError;

/// Token ceiling applied to the transcript before every request.
pub const DEFAULT_TOKEN_BUDGET: usize = 100;

/// One conversation: a transcript plus the collaborators that drive it.
///
/// Mutating operations take `&mut self`, so a session is exclusive to its
/// caller by construction. Sessions built separately are fully independent.
pub struct ChatSession {
    transcript: Transcript,
    backend: Arc<dyn CompletionBackend>,
    counter: SharedTokenCounter,
    token_budget: usize,
}

impl ChatSession {
    /// Assemble a session from already-built collaborators.
    ///
    /// Most callers go through [`builder`](Self::builder); this constructor
    /// is the seam for substituting a scripted backend or counter.
    pub fn new(
        system_prompt: impl Into<String>,
        backend: Arc<dyn CompletionBackend>,
        counter: SharedTokenCounter,
        token_budget: usize,
    ) -> Self {
        Self {
            transcript: Transcript::new(system_prompt),
            backend,
            counter,
            token_budget,
        }
    }

    /// Start configuring a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Run one conversation turn and return the assistant's reply.
    ///
    /// The user message is appended first, then the transcript is trimmed
    /// to the token budget, and the whole trimmed transcript goes to the
    /// backend. On failure the error propagates and the appended user
    /// message stays in place; the next successful turn re-sends it.
    pub async fn send(
        &mut self,
        user_input: &str,
        options: GenerationOptions,
    ) -> Result<String, SessionError> {
        if user_input.trim().is_empty() {
            return Err(SessionError::EmptyUserMessage);
        }

        self.transcript.push_user(user_input);
        let outcome = enforce_budget(
            self.counter.as_ref(),
            &mut self.transcript,
            self.token_budget,
        );
        debug!(
            "transcript at {} token(s) after evicting {} message(s)",
            outcome.total.budgeted_total(),
            outcome.evicted
        );
        if outcome.at_floor {
            warn!("transcript over the token budget at minimum size, sending anyway");
        }

        let reply = self
            .backend
            .complete(self.transcript.messages(), options)
            .await?;
        self.transcript.push_assistant(reply.clone());
        Ok(reply)
    }

    /// The transcript, system message first.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Overwrite the system message without touching the conversation.
    pub fn replace_system_prompt(&mut self, system_prompt: impl Into<String>) {
        self.transcript.replace_system_prompt(system_prompt);
    }

    /// Drop the conversation and start over under `system_prompt`.
    pub fn reset(&mut self, system_prompt: impl Into<String>) {
        self.transcript.reset(system_prompt);
    }

    /// The token ceiling enforced before each request.
    pub fn token_budget(&self) -> usize {
        self.token_budget
    }
}

/// Builder for [`ChatSession`].
///
/// `build` resolves the API key (secrets file first, then environment) and
/// fails with [`SessionError::Config`] before any input is accepted when
/// neither source has one.
#[derive(Default)]
pub struct SessionBuilder {
    system_prompt: Option<String>,
    token_budget: Option<usize>,
    model: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
    secrets_path: Option<PathBuf>,
}

impl SessionBuilder {
    /// System message text. Defaults to the arrogant-assistant preset.
    pub fn system_prompt(mut self, text: impl Into<String>) -> Self {
        self.system_prompt = Some(text.into());
        self
    }

    /// System message from a preset.
    pub fn preset(mut self, preset: SystemPromptPreset) -> Self {
        self.system_prompt = Some(preset.prompt_text().to_string());
        self
    }

    /// Token ceiling for the transcript. Defaults to
    /// [`DEFAULT_TOKEN_BUDGET`].
    pub fn token_budget(mut self, budget: usize) -> Self {
        self.token_budget = Some(budget);
        self
    }

    /// Model identifier; also picks the tokenizer encoding.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Endpoint base URL, e.g. a local mock during tests.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Explicit API key, skipping secrets and environment resolution.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Secrets file to consult instead of the default location.
    pub fn secrets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.secrets_path = Some(path.into());
        self
    }

    /// Resolve the API key and assemble the session.
    pub fn build(self) -> Result<ChatSession, SessionError> {
        let api_key = match self.api_key {
            Some(api_key) => api_key,
            None => resolve_api_key(self.secrets_path.as_deref())?,
        };
        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let mut client = ChatClient::new(api_key).with_model(model.as_str());
        if let Some(base_url) = self.base_url {
            client = client.with_base_url(base_url);
        }
        let counter: SharedTokenCounter = Arc::new(TiktokenCounter::for_model(&model));
        let system_prompt = self
            .system_prompt
            .unwrap_or_else(|| SystemPromptPreset::default().prompt_text().to_string());

        Ok(ChatSession::new(
            system_prompt,
            Arc::new(client),
            counter,
            self.token_budget.unwrap_or(DEFAULT_TOKEN_BUDGET),
        ))
    }
}
