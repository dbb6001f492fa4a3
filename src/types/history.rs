use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Response envelope for a session's message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistory {
    /// Messages in chronological order.
    #[serde(default)]
    pub messages: Vec<Message>,
}
