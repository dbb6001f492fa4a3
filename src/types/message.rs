use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::types::timestamp;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// A message typed by the user.
    User,
    /// A reply from the assistant.
    Assistant,
    /// An error surfaced inline in the conversation.
    Error,
}

impl MessageRole {
    /// Returns the display label for this role.
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::User => "You",
            MessageRole::Assistant => "AI",
            MessageRole::Error => "Error",
        }
    }
}

/// A single message in a session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned message identifier. The server emits integers;
    /// they are normalized to strings here.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Who authored the message.
    pub role: MessageRole,

    /// The message text.
    pub content: String,

    /// When the message was stored.
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Number(n) => Ok(n.to_string()),
    }
}
