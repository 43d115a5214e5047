//! The ordered message sequence owned by one chat session.

use serde::Serialize;

use crate::message::Message;

/// Ordered sequence of messages for a single session.
///
/// Element 0 is always the system message: it is created with the
/// transcript, can be overwritten in place, and is never removed by
/// eviction. All other mutation is appends at the tail and evictions at
/// index 1, so a transcript always holds at least one message.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript containing exactly one system message.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Overwrite the system message content in place.
    ///
    /// Every other message keeps its position and identity.
    pub fn replace_system_prompt(&mut self, system_prompt: impl Into<String>) {
        self.messages[0].content = system_prompt.into();
    }

    /// Drop the whole conversation and start over with a fresh system
    /// message.
    pub fn reset(&mut self, system_prompt: impl Into<String>) {
        self.messages.clear();
        self.messages.push(Message::system(system_prompt));
    }

    /// Append a user message at the tail.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message at the tail.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Remove and return the oldest non-system message (index 1).
    ///
    /// Returns `None` when only the system message remains; the system
    /// message itself is never removed.
    pub fn evict_oldest_turn(&mut self) -> Option<Message> {
        if self.messages.len() <= 1 {
            return None;
        }
        Some(self.messages.remove(1))
    }

    /// All messages in order, system message first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The conversation turns, everything after the system message.
    ///
    /// This is the slice a rendering layer displays; the system message is
    /// configuration, not conversation.
    pub fn turns(&self) -> &[Message] {
        self.messages.get(1..).unwrap_or_default()
    }

    /// Content of the system message.
    pub fn system_prompt(&self) -> &str {
        &self.messages[0].content
    }

    /// Number of messages, including the system message.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: a transcript holds at least its system message.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn test_new_holds_single_system_message() {
        let transcript = Transcript::new("Be helpful.");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.system_prompt(), "Be helpful.");
        assert_eq!(transcript.messages()[0].role, Role::System);
        assert!(transcript.turns().is_empty());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::new("sys");
        transcript.push_user("first");
        transcript.push_assistant("second");
        transcript.push_user("third");

        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["sys", "first", "second", "third"]);
    }

    #[test]
    fn test_replace_system_prompt_keeps_other_messages() {
        let mut transcript = Transcript::new("old prompt");
        transcript.push_user("question");
        transcript.push_assistant("answer");
        let user_id = transcript.messages()[1].id.clone();

        transcript.replace_system_prompt("new prompt");

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.system_prompt(), "new prompt");
        assert_eq!(transcript.messages()[1].id, user_id);
        assert_eq!(transcript.messages()[2].content, "answer");
    }

    #[test]
    fn test_reset_drops_conversation() {
        let mut transcript = Transcript::new("old prompt");
        transcript.push_user("question");
        transcript.push_assistant("answer");

        transcript.reset("fresh prompt");

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.system_prompt(), "fresh prompt");
        assert!(transcript.turns().is_empty());
    }

    #[test]
    fn test_evict_removes_oldest_turn_only() {
        let mut transcript = Transcript::new("sys");
        transcript.push_user("oldest");
        transcript.push_assistant("middle");
        transcript.push_user("newest");

        let evicted = transcript.evict_oldest_turn().unwrap();
        assert_eq!(evicted.content, "oldest");

        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["sys", "middle", "newest"]);
    }

    #[test]
    fn test_evict_never_removes_system_message() {
        let mut transcript = Transcript::new("sys");
        transcript.push_user("only turn");

        assert!(transcript.evict_oldest_turn().is_some());
        assert!(transcript.evict_oldest_turn().is_none());
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.system_prompt(), "sys");
    }

    #[test]
    fn test_turns_excludes_system_message() {
        let mut transcript = Transcript::new("sys");
        transcript.push_user("hello");
        transcript.push_assistant("hi");

        let turns = transcript.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Assistant);
    }
}
