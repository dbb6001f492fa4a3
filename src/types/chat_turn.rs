use serde::{Deserialize, Serialize};

/// Request body for sending one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,

    /// The session to append to. `None` asks the server to start a new
    /// session and report its id in the reply.
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Creates a request targeting the given session, if any.
    pub fn new(message: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            session_id,
        }
    }
}

/// The server's reply to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's reply text.
    #[serde(default)]
    pub reply: Option<String>,

    /// The session the exchange was stored under. Authoritative: a send
    /// without a session id gets one assigned here.
    #[serde(default)]
    pub session_id: Option<String>,
}
