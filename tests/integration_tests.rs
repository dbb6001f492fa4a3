//! Integration tests for the parley library.
//! These tests require a running server and credentials in the environment.

#[cfg(test)]
mod tests {
    use parley::chat::{AlwaysConfirm, ChatController};
    use parley::{Backend, LoginParams};

    /// Returns a signed-in controller, or `None` when the environment does
    /// not provide a server and credentials.
    async fn signed_in_controller() -> Option<ChatController> {
        let server = std::env::var("PARLEY_SERVER_URL").ok();
        let username = std::env::var("PARLEY_TEST_USERNAME").ok();
        let password = std::env::var("PARLEY_TEST_PASSWORD").ok();
        let (Some(server), Some(username), Some(password)) = (server, username, password) else {
            eprintln!(
                "Skipping test: PARLEY_SERVER_URL, PARLEY_TEST_USERNAME, \
                 or PARLEY_TEST_PASSWORD not set"
            );
            return None;
        };

        let client = Backend::new(Some(server)).expect("Failed to create client");
        let mut controller = ChatController::new(client);
        let params = LoginParams { username, password };
        controller.login(&params).await.expect("login should succeed");
        Some(controller)
    }

    #[tokio::test]
    async fn test_auth_probe_round_trip() {
        let Some(mut controller) = signed_in_controller().await else {
            return;
        };
        let signed_in = controller.check_auth().await.expect("probe should succeed");
        assert!(signed_in);
        assert!(controller.state().auth.user_name.is_some());

        controller.logout().await;
        let signed_in = controller.check_auth().await.expect("probe should succeed");
        assert!(!signed_in);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let Some(mut controller) = signed_in_controller().await else {
            return;
        };

        let session_id = controller
            .new_session()
            .await
            .expect("new session should succeed");
        assert_eq!(controller.state().current_session_id(), Some(&*session_id));

        let sessions = controller.refresh_sessions().await;
        assert!(sessions.iter().any(|s| s.session_id == session_id));

        controller
            .open_session(&session_id)
            .await
            .expect("open should succeed");
        assert!(controller.transcript().is_empty());

        let deleted = controller
            .delete_session(&session_id, &mut AlwaysConfirm)
            .await
            .expect("delete should succeed");
        assert!(deleted);
        assert!(controller.state().current_session_id().is_none());
    }

    #[tokio::test]
    async fn test_history_round_trip() {
        use parley::Renderer;
        use parley::chat::SendOutcome;
        use parley::{ChatSession, TranscriptEntry};

        struct NullRenderer;
        impl Renderer for NullRenderer {
            fn message(&mut self, _entry: &TranscriptEntry) {}
            fn print_info(&mut self, _info: &str) {}
            fn print_error(&mut self, _error: &str) {}
            fn show_loading(&mut self) {}
            fn hide_loading(&mut self) {}
            fn empty_state(&mut self) {}
            fn session_list(&mut self, _sessions: &[ChatSession], _active: Option<&str>) {}
            fn copy(&mut self, _text: &str) {}
        }

        let Some(mut controller) = signed_in_controller().await else {
            return;
        };

        let mut renderer = NullRenderer;
        let outcome = controller.send("Say 'test passed'", &mut renderer).await;
        assert_eq!(outcome, SendOutcome::Success);
        let session_id = controller
            .state()
            .current_session_id()
            .expect("send should establish a session")
            .to_string();

        controller
            .open_session(&session_id)
            .await
            .expect("open should succeed");
        assert!(controller.transcript().len() >= 2);

        controller
            .delete_session(&session_id, &mut AlwaysConfirm)
            .await
            .expect("delete should succeed");
    }
}
