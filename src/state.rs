//! Client-side state.
//!
//! The only state the client owns: who is signed in, which session is
//! active, and the last message the user sent. Everything else (session
//! lists, message history) is server-owned and merely cached for display.

/// Sign-in status, as established by the identity probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Whether the identity probe succeeded.
    pub signed_in: bool,

    /// The signed-in user's name.
    pub user_name: Option<String>,
}

impl AuthState {
    /// Marks the user as signed in.
    pub fn establish(&mut self, user_name: impl Into<String>) {
        self.signed_in = true;
        self.user_name = Some(user_name.into());
    }

    /// Resets to signed-out. Used on startup, logout, and 401 responses.
    pub fn reset(&mut self) {
        self.signed_in = false;
        self.user_name = None;
    }
}

/// All mutable client-side state, owned by the chat controller.
///
/// Invariant: at most one session is active at a time. The pointer is set
/// only by the create/open/send-reply flows and cleared on delete-of-current
/// or logout; an expired sign-in (401) resets auth but leaves the pointer.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    /// Sign-in status.
    pub auth: AuthState,

    /// The active session pointer, if any.
    current_session_id: Option<String>,

    /// The most recent user text, kept only to support retry. Overwritten
    /// on every send; not persisted.
    last_user_message: Option<String>,
}

impl ClientState {
    /// Creates a fresh signed-out state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active session id, if any.
    pub fn current_session_id(&self) -> Option<&str> {
        self.current_session_id.as_deref()
    }

    /// Makes `session_id` the active session.
    pub fn set_active_session(&mut self, session_id: impl Into<String>) {
        self.current_session_id = Some(session_id.into());
    }

    /// Clears the active session pointer.
    pub fn clear_active_session(&mut self) {
        self.current_session_id = None;
    }

    /// Returns true if `session_id` is the active session.
    pub fn is_active_session(&self, session_id: &str) -> bool {
        self.current_session_id.as_deref() == Some(session_id)
    }

    /// Records the most recent user text for retry.
    pub fn note_user_message(&mut self, text: impl Into<String>) {
        self.last_user_message = Some(text.into());
    }

    /// Returns the most recent user text, if any.
    pub fn last_user_message(&self) -> Option<&str> {
        self.last_user_message.as_deref()
    }

    /// Applies logout: auth reset and pointer cleared, unconditionally.
    pub fn sign_out(&mut self) {
        self.auth.reset();
        self.current_session_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_signed_out() {
        let state = ClientState::new();
        assert!(!state.auth.signed_in);
        assert!(state.auth.user_name.is_none());
        assert!(state.current_session_id().is_none());
        assert!(state.last_user_message().is_none());
    }

    #[test]
    fn establish_and_reset_auth() {
        let mut state = ClientState::new();
        state.auth.establish("ada");
        assert!(state.auth.signed_in);
        assert_eq!(state.auth.user_name.as_deref(), Some("ada"));

        state.auth.reset();
        assert!(!state.auth.signed_in);
        assert!(state.auth.user_name.is_none());
    }

    #[test]
    fn auth_reset_preserves_pointer() {
        let mut state = ClientState::new();
        state.auth.establish("ada");
        state.set_active_session("s1");

        state.auth.reset();
        assert_eq!(state.current_session_id(), Some("s1"));
    }

    #[test]
    fn sign_out_clears_pointer() {
        let mut state = ClientState::new();
        state.auth.establish("ada");
        state.set_active_session("s1");

        state.sign_out();
        assert!(!state.auth.signed_in);
        assert!(state.current_session_id().is_none());
    }

    #[test]
    fn active_session_checks() {
        let mut state = ClientState::new();
        assert!(!state.is_active_session("s1"));

        state.set_active_session("s1");
        assert!(state.is_active_session("s1"));
        assert!(!state.is_active_session("s2"));

        state.clear_active_session();
        assert!(!state.is_active_session("s1"));
    }

    #[test]
    fn last_user_message_overwritten() {
        let mut state = ClientState::new();
        state.note_user_message("first");
        state.note_user_message("second");
        assert_eq!(state.last_user_message(), Some("second"));
    }
}
