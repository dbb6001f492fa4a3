//! The transcript: the ordered message view for the active session.
//!
//! This is the data side of rendering. It knows nothing about the network;
//! the chat controller appends to it and renderers paint from it. User
//! messages are appended optimistically with synthetic ids; reloading a
//! session's history replaces them with server-authoritative entries.

use time::OffsetDateTime;

use crate::types::{Message, MessageRole};

/// One displayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Synthetic (`msg-...`) for optimistic entries, server-assigned after
    /// a history reload.
    pub id: String,

    /// Who authored the entry.
    pub role: MessageRole,

    /// The entry text.
    pub content: String,

    /// When the entry was created, client clock for optimistic entries.
    pub created_at: OffsetDateTime,
}

/// The ordered sequence of displayed messages, plus the loading flag.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    loading: bool,
    next_synthetic: u64,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entries in display order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the transcript shows the empty-state.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true while a send is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Shows the loading indicator. Idempotent.
    pub fn show_loading(&mut self) {
        self.loading = true;
    }

    /// Hides the loading indicator. Idempotent.
    pub fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn synthetic_id(&mut self) -> String {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let seq = self.next_synthetic;
        self.next_synthetic += 1;
        format!("msg-{nanos}-{seq}")
    }

    fn push(&mut self, role: MessageRole, content: impl Into<String>) -> &TranscriptEntry {
        let entry = TranscriptEntry {
            id: self.synthetic_id(),
            role,
            content: content.into(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.entries.push(entry);
        self.entries.last().expect("entry was just pushed")
    }

    /// Appends a user message.
    pub fn push_user(&mut self, content: impl Into<String>) -> &TranscriptEntry {
        self.push(MessageRole::User, content)
    }

    /// Appends an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &TranscriptEntry {
        self.push(MessageRole::Assistant, content)
    }

    /// Appends an inline error.
    pub fn push_error(&mut self, content: impl Into<String>) -> &TranscriptEntry {
        self.push(MessageRole::Error, content)
    }

    /// Removes the most recent error entry, leaving earlier errors alone.
    ///
    /// Returns true if an entry was removed.
    pub fn remove_last_error(&mut self) -> bool {
        if let Some(index) = self
            .entries
            .iter()
            .rposition(|entry| entry.role == MessageRole::Error)
        {
            self.entries.remove(index);
            true
        } else {
            false
        }
    }

    /// Replaces the view with a session's history.
    pub fn replace(&mut self, messages: &[Message]) {
        self.entries = messages
            .iter()
            .map(|message| TranscriptEntry {
                id: message.id.clone(),
                role: message.role,
                content: message.content.clone(),
                created_at: message.created_at,
            })
            .collect();
        self.loading = false;
    }

    /// Resets to the empty-state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn new_transcript_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert!(!transcript.is_loading());
    }

    #[test]
    fn push_order_preserved() {
        let mut transcript = Transcript::new();
        transcript.push_user("hello");
        transcript.push_assistant("hi there");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.entries()[0].role, MessageRole::User);
        assert_eq!(transcript.entries()[1].role, MessageRole::Assistant);
    }

    #[test]
    fn synthetic_ids_unique() {
        let mut transcript = Transcript::new();
        let first = transcript.push_user("one").id.clone();
        let second = transcript.push_user("two").id.clone();
        assert_ne!(first, second);
        assert!(first.starts_with("msg-"));
    }

    #[test]
    fn loading_idempotent() {
        let mut transcript = Transcript::new();
        transcript.show_loading();
        transcript.show_loading();
        assert!(transcript.is_loading());
        transcript.hide_loading();
        transcript.hide_loading();
        assert!(!transcript.is_loading());
    }

    #[test]
    fn remove_last_error_only() {
        let mut transcript = Transcript::new();
        transcript.push_error("first failure");
        transcript.push_user("hello");
        transcript.push_error("second failure");
        transcript.push_assistant("hi there");

        assert!(transcript.remove_last_error());
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.entries()[0].content, "first failure");
        assert_eq!(transcript.entries()[1].content, "hello");
        assert_eq!(transcript.entries()[2].content, "hi there");
    }

    #[test]
    fn remove_last_error_without_errors() {
        let mut transcript = Transcript::new();
        transcript.push_user("hello");
        assert!(!transcript.remove_last_error());
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn replace_adopts_server_ids() {
        let mut transcript = Transcript::new();
        transcript.push_user("optimistic");
        transcript.show_loading();

        let history = vec![
            Message {
                id: "1".to_string(),
                role: MessageRole::User,
                content: "hello".to_string(),
                created_at: datetime!(2025-02-19 12:00:00 UTC),
            },
            Message {
                id: "2".to_string(),
                role: MessageRole::Assistant,
                content: "hi there".to_string(),
                created_at: datetime!(2025-02-19 12:00:03 UTC),
            },
        ];
        transcript.replace(&history);

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.entries()[0].id, "1");
        assert_eq!(transcript.entries()[1].id, "2");
        assert!(!transcript.is_loading());
    }

    #[test]
    fn clear_resets_everything() {
        let mut transcript = Transcript::new();
        transcript.push_user("hello");
        transcript.show_loading();
        transcript.clear();
        assert!(transcript.is_empty());
        assert!(!transcript.is_loading());
    }
}
