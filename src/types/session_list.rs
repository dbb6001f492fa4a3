use serde::{Deserialize, Serialize};

use crate::types::ChatSession;

/// Response envelope for the session list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionListResponse {
    /// Sessions in server-defined order.
    #[serde(default)]
    pub sessions: Vec<ChatSession>,
}

/// Response envelope for starting a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSessionResponse {
    /// The freshly created session's id.
    pub session_id: String,
}

/// Response envelope for deleting all sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    /// How many sessions were deleted.
    #[serde(default)]
    pub count: u64,
}
