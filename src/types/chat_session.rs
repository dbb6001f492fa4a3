use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::types::timestamp;

/// A persisted conversation thread, owned by the server.
///
/// The client holds a read-only ordered sequence of these for display;
/// ordering is server-defined (most recently updated first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Opaque session identifier.
    pub session_id: String,

    /// Human-readable title. Older sessions may not have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// When the session was created.
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,

    /// When the session last changed, if the server reports it.
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl ChatSession {
    /// Returns the title to display for this session, falling back to a
    /// creation-date label when the session has no title.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => {
                let format = format_description!("[year]-[month]-[day]");
                let date = self
                    .created_at
                    .format(&format)
                    .unwrap_or_else(|_| self.created_at.date().to_string());
                format!("Chat {date}")
            }
        }
    }
}
