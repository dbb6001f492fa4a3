//! The chat controller: ties the backend client, client state, and
//! transcript together behind the send/receive state machine.
//!
//! Every mutating operation takes `&mut self`, so a controller can only run
//! one operation at a time; a second send cannot start until the first
//! resolves.

use crate::client::Backend;
use crate::error::{Error, Result};
use crate::observability::{
    AUTH_EXPIRED, AUTH_PROBES, CHAT_RETRIES, CHAT_SENDS, CHAT_SEND_ERRORS, SESSION_DELETES,
};
use crate::render::Renderer;
use crate::state::ClientState;
use crate::transcript::Transcript;
use crate::types::{ChatRequest, ChatSession, LoginParams, RegisterForm};

/// Shown in place of an empty or missing reply body.
pub const NO_RESPONSE_TEXT: &str = "No response received";

const SIGNED_OUT_TEXT: &str = "Please log in to use the chat.";
const AUTH_EXPIRED_TEXT: &str = "Your session has expired. Please log in again.";

/// How a send attempt resolved.
///
/// Failures surface as inline transcript entries, not as `Err`; the outcome
/// tells the caller what happened so it can adjust prompts or hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The user is not signed in; nothing was sent.
    NotSignedIn,

    /// The input was empty after trimming; nothing was sent.
    EmptyInput,

    /// The reply was received and appended.
    Success,

    /// The server rejected the cookie mid-conversation.
    AuthExpired,

    /// The server answered with an error status.
    ServerError,

    /// The server could not be reached.
    NetworkError,
}

/// Guard for destructive operations.
///
/// Deleting sessions is irreversible, so the controller asks before acting.
pub trait Confirmation {
    /// Returns true if the operation should proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A [`Confirmation`] that always proceeds. For non-interactive use.
pub struct AlwaysConfirm;

impl Confirmation for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// The chat controller.
pub struct ChatController {
    client: Backend,
    state: ClientState,
    transcript: Transcript,
    sessions: Vec<ChatSession>,
    screen_replies: bool,
}

impl ChatController {
    /// Creates a controller around a backend client.
    pub fn new(client: Backend) -> Self {
        Self {
            client,
            state: ClientState::new(),
            transcript: Transcript::new(),
            sessions: Vec::new(),
            screen_replies: true,
        }
    }

    /// Sets whether replies whose text mentions "error" get error styling.
    pub fn with_screening(mut self, enabled: bool) -> Self {
        self.screen_replies = enabled;
        self
    }

    /// Returns the client state.
    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Returns the transcript for the active session.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the cached session list from the last refresh.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Probes the identity endpoint and updates the auth state.
    ///
    /// Returns true if a live cookie session was found. A 401 is the
    /// expected signed-out answer, not an error; any other failure also
    /// leaves the client signed out, then propagates. No retry; the next
    /// probe happens on the next user action.
    pub async fn check_auth(&mut self) -> Result<bool> {
        AUTH_PROBES.click();
        match self.client.me().await {
            Ok(identity) => {
                self.state.auth.establish(identity.username);
                Ok(true)
            }
            Err(err) if err.is_authentication() => {
                self.state.auth.reset();
                Ok(false)
            }
            Err(err) => {
                self.state.auth.reset();
                Err(err)
            }
        }
    }

    /// Signs in and establishes the auth state from the server's answer.
    pub async fn login(&mut self, params: &LoginParams) -> Result<()> {
        self.client.login(params).await?;
        let identity = self.client.me().await?;
        self.state.auth.establish(identity.username);
        Ok(())
    }

    /// Validates the registration form and creates the account.
    ///
    /// Registration does not sign the user in.
    pub async fn register(&mut self, form: RegisterForm) -> Result<()> {
        let params = form.validate()?;
        self.client.register(&params).await
    }

    /// Signs out.
    ///
    /// The server call is best-effort; local state is cleared even when the
    /// server cannot be reached, so the client always ends up signed out.
    pub async fn logout(&mut self) {
        let _ = self.client.logout().await;
        self.state.sign_out();
        self.transcript.clear();
        self.sessions.clear();
    }

    /// Refreshes the cached session list.
    ///
    /// A failed refresh leaves an empty list rather than an error; the
    /// session list is a convenience view, never a blocker.
    pub async fn refresh_sessions(&mut self) -> &[ChatSession] {
        match self.client.sessions().await {
            Ok(sessions) => self.sessions = sessions,
            Err(_) => self.sessions.clear(),
        }
        &self.sessions
    }

    /// Starts a new session, makes it active, and clears the view.
    pub async fn new_session(&mut self) -> Result<String> {
        let session_id = self.client.new_session().await?;
        self.state.set_active_session(&session_id);
        self.transcript.clear();
        self.refresh_sessions().await;
        Ok(session_id)
    }

    /// Opens a session: fetches its history and replaces the view.
    ///
    /// On failure the current view and pointer are left untouched.
    pub async fn open_session(&mut self, session_id: &str) -> Result<()> {
        let messages = self.client.history(session_id).await?;
        self.state.set_active_session(session_id);
        self.transcript.replace(&messages);
        Ok(())
    }

    /// Deletes one session after confirmation.
    ///
    /// Returns false if the confirmation declined. Deleting the active
    /// session also clears the pointer and the view.
    pub async fn delete_session(
        &mut self,
        session_id: &str,
        confirm: &mut dyn Confirmation,
    ) -> Result<bool> {
        if !confirm.confirm("Delete this chat session?") {
            return Ok(false);
        }
        self.client.delete_session(session_id).await?;
        SESSION_DELETES.click();
        if self.state.is_active_session(session_id) {
            self.state.clear_active_session();
            self.transcript.clear();
        }
        self.refresh_sessions().await;
        Ok(true)
    }

    /// Deletes every session after confirmation.
    ///
    /// Returns `None` if the confirmation declined, otherwise how many
    /// sessions the server removed.
    pub async fn delete_all_sessions(
        &mut self,
        confirm: &mut dyn Confirmation,
    ) -> Result<Option<u64>> {
        if !confirm.confirm("Delete ALL chat sessions? This cannot be undone.") {
            return Ok(None);
        }
        let count = self.client.delete_all_sessions().await?;
        SESSION_DELETES.click();
        self.state.clear_active_session();
        self.transcript.clear();
        self.sessions.clear();
        Ok(Some(count))
    }

    /// Sends one message and appends the reply (or an inline error).
    pub async fn send(&mut self, text: &str, renderer: &mut dyn Renderer) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::EmptyInput;
        }
        if !self.state.auth.signed_in {
            let entry = self.transcript.push_error(SIGNED_OUT_TEXT).clone();
            renderer.message(&entry);
            return SendOutcome::NotSignedIn;
        }
        let text = text.to_string();
        let entry = self.transcript.push_user(&text).clone();
        renderer.message(&entry);
        self.state.note_user_message(&text);
        self.dispatch(text, renderer).await
    }

    /// Resends the last user message, removing the last inline error first.
    ///
    /// Re-invokes the full send path, so the signed-out guard applies and
    /// the user bubble renders again. A no-op when nothing has been sent
    /// yet.
    pub async fn retry(&mut self, renderer: &mut dyn Renderer) -> SendOutcome {
        let Some(text) = self.state.last_user_message().map(String::from) else {
            return SendOutcome::EmptyInput;
        };
        CHAT_RETRIES.click();
        self.transcript.remove_last_error();
        self.send(&text, renderer).await
    }

    /// The request leg of a send. The user bubble is already in the
    /// transcript by the time this runs.
    async fn dispatch(&mut self, text: String, renderer: &mut dyn Renderer) -> SendOutcome {
        CHAT_SENDS.click();
        self.transcript.show_loading();
        renderer.show_loading();

        let request = ChatRequest {
            message: text,
            session_id: self.state.current_session_id().map(String::from),
        };
        let result = self.client.chat(&request).await;

        self.transcript.hide_loading();
        renderer.hide_loading();

        match result {
            Ok(reply) => {
                if let Some(session_id) = &reply.session_id {
                    self.state.set_active_session(session_id);
                }
                let content = reply_text(&reply.reply);
                let entry = if self.screen_replies && looks_like_error(&content) {
                    self.transcript.push_error(content).clone()
                } else {
                    self.transcript.push_assistant(content).clone()
                };
                renderer.message(&entry);
                // Refresh whenever the server names a session: a brand-new
                // session acquires its list entry, and an existing one picks
                // up its server-assigned title.
                if reply.session_id.is_some() {
                    self.refresh_sessions().await;
                }
                SendOutcome::Success
            }
            Err(err) => {
                CHAT_SEND_ERRORS.click();
                let outcome = classify_send_error(&err);
                if outcome == SendOutcome::AuthExpired {
                    AUTH_EXPIRED.click();
                    // Auth is gone but the session pointer survives, so a
                    // fresh login can pick up where it left off.
                    self.state.auth.reset();
                }
                let entry = self.transcript.push_error(send_error_text(&err)).clone();
                renderer.message(&entry);
                outcome
            }
        }
    }
}

/// Maps a send failure onto its outcome.
fn classify_send_error(err: &Error) -> SendOutcome {
    if err.is_authentication() {
        SendOutcome::AuthExpired
    } else if err.is_network() {
        SendOutcome::NetworkError
    } else {
        SendOutcome::ServerError
    }
}

/// The transcript text for a send failure.
fn send_error_text(err: &Error) -> String {
    if err.is_authentication() {
        AUTH_EXPIRED_TEXT.to_string()
    } else if err.is_network() {
        format!("Could not reach the server: {err}")
    } else {
        format!("Sorry, something went wrong: {err}")
    }
}

/// Extracts displayable reply text, substituting the placeholder for empty
/// or missing bodies.
fn reply_text(reply: &Option<String>) -> String {
    match reply.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NO_RESPONSE_TEXT.to_string(),
    }
}

/// Returns true if reply text reads like an error despite the 200 status.
fn looks_like_error(text: &str) -> bool {
    text.to_lowercase().contains("error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptEntry;
    use crate::types::MessageRole;

    fn controller() -> ChatController {
        let client = Backend::new(Some("http://localhost:8000".to_string())).unwrap();
        ChatController::new(client)
    }

    #[derive(Default)]
    struct RecordingRenderer {
        messages: Vec<TranscriptEntry>,
        loading_shown: u32,
        loading_hidden: u32,
    }

    impl Renderer for RecordingRenderer {
        fn message(&mut self, entry: &TranscriptEntry) {
            self.messages.push(entry.clone());
        }
        fn print_info(&mut self, _info: &str) {}
        fn print_error(&mut self, _error: &str) {}
        fn show_loading(&mut self) {
            self.loading_shown += 1;
        }
        fn hide_loading(&mut self) {
            self.loading_hidden += 1;
        }
        fn empty_state(&mut self) {}
        fn session_list(&mut self, _sessions: &[ChatSession], _active: Option<&str>) {}
        fn copy(&mut self, _text: &str) {}
    }

    struct NeverConfirm;

    impl Confirmation for NeverConfirm {
        fn confirm(&mut self, _prompt: &str) -> bool {
            false
        }
    }

    #[test]
    fn empty_input_short_circuits() {
        let mut controller = controller();
        let mut renderer = RecordingRenderer::default();
        let outcome = tokio_test::block_on(controller.send("   ", &mut renderer));
        assert_eq!(outcome, SendOutcome::EmptyInput);
        assert!(controller.transcript().is_empty());
        assert!(renderer.messages.is_empty());
    }

    #[test]
    fn signed_out_send_is_inline_error() {
        let mut controller = controller();
        let mut renderer = RecordingRenderer::default();
        let outcome = tokio_test::block_on(controller.send("hello", &mut renderer));
        assert_eq!(outcome, SendOutcome::NotSignedIn);
        assert_eq!(controller.transcript().len(), 1);
        assert_eq!(controller.transcript().entries()[0].role, MessageRole::Error);
        assert_eq!(renderer.messages.len(), 1);
        // No user bubble, no loading indicator, no recorded message.
        assert_eq!(renderer.loading_shown, 0);
        assert!(controller.state().last_user_message().is_none());
    }

    #[test]
    fn retry_without_history_is_a_noop() {
        let mut controller = controller();
        let mut renderer = RecordingRenderer::default();
        let outcome = tokio_test::block_on(controller.retry(&mut renderer));
        assert_eq!(outcome, SendOutcome::EmptyInput);
        assert!(controller.transcript().is_empty());
    }

    #[test]
    fn declined_confirmation_deletes_nothing() {
        let mut controller = controller();
        let outcome =
            tokio_test::block_on(controller.delete_all_sessions(&mut NeverConfirm)).unwrap();
        assert_eq!(outcome, None);

        let deleted =
            tokio_test::block_on(controller.delete_session("s1", &mut NeverConfirm)).unwrap();
        assert!(!deleted);
    }

    #[test]
    fn classify_send_errors() {
        assert_eq!(
            classify_send_error(&Error::authentication("expired")),
            SendOutcome::AuthExpired
        );
        assert_eq!(
            classify_send_error(&Error::timeout("slow", Some(60.0))),
            SendOutcome::NetworkError
        );
        assert_eq!(
            classify_send_error(&Error::connection("refused", None)),
            SendOutcome::NetworkError
        );
        assert_eq!(
            classify_send_error(&Error::internal_server("boom")),
            SendOutcome::ServerError
        );
        assert_eq!(
            classify_send_error(&Error::bad_request("nope", None)),
            SendOutcome::ServerError
        );
    }

    #[test]
    fn reply_text_fallback() {
        assert_eq!(reply_text(&Some("hi".to_string())), "hi");
        assert_eq!(reply_text(&Some("  ".to_string())), NO_RESPONSE_TEXT);
        assert_eq!(reply_text(&None), NO_RESPONSE_TEXT);
    }

    #[test]
    fn error_screening_is_case_insensitive() {
        assert!(looks_like_error("Error: upstream failed"));
        assert!(looks_like_error("an ERROR occurred"));
        assert!(!looks_like_error("all good"));
    }

    #[test]
    fn send_error_texts() {
        assert_eq!(
            send_error_text(&Error::authentication("expired")),
            AUTH_EXPIRED_TEXT
        );
        assert!(
            send_error_text(&Error::connection("refused", None))
                .starts_with("Could not reach the server")
        );
        assert!(
            send_error_text(&Error::internal_server("boom"))
                .starts_with("Sorry, something went wrong")
        );
    }
}
