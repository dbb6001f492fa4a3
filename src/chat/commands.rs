//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the session without sending a chat message
//! to the server.

/// A parsed chat command.
///
/// These commands control the client and are not sent as chat messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Sign in, prompting for credentials.
    Login,

    /// Create an account, prompting for details.
    Register,

    /// Sign out.
    Logout,

    /// Show who is signed in.
    WhoAmI,

    /// Start a new session and make it active.
    New,

    /// List sessions.
    Sessions,

    /// Open a session by id, replacing the view with its history.
    Open(String),

    /// Delete one session by id.
    Delete(String),

    /// Delete every session.
    DeleteAll,

    /// Resend the last user message after removing the last error.
    Retry,

    /// Copy the last message to the clipboard.
    Copy,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be sent as a chat message.
///
/// # Examples
///
/// ```
/// # use parley::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/open s1").is_some());
/// assert!(parse_command("Hello there!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "login" => ChatCommand::Login,
        "register" | "signup" => ChatCommand::Register,
        "logout" => ChatCommand::Logout,
        "whoami" => ChatCommand::WhoAmI,
        "new" => ChatCommand::New,
        "sessions" | "list" => ChatCommand::Sessions,
        "open" | "load" => match argument {
            Some(id) => ChatCommand::Open(id.to_string()),
            None => ChatCommand::Invalid("/open requires a session id".to_string()),
        },
        "delete" => match argument {
            Some(arg) if arg.eq_ignore_ascii_case("all") => ChatCommand::DeleteAll,
            Some(id) => ChatCommand::Delete(id.to_string()),
            None => {
                ChatCommand::Invalid("/delete requires a session id (or 'all')".to_string())
            }
        },
        "retry" => ChatCommand::Retry,
        "copy" => ChatCommand::Copy,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /login                 Sign in
  /register              Create an account
  /logout                Sign out
  /whoami                Show the signed-in user
  /new                   Start a new chat session
  /sessions              List chat sessions
  /open <id>             Open a session and show its history
  /delete <id>           Delete a session
  /delete all            Delete every session
  /retry                 Resend the last message
  /copy                  Copy the last message to the clipboard
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_auth_commands() {
        assert_eq!(parse_command("/login"), Some(ChatCommand::Login));
        assert_eq!(parse_command("/register"), Some(ChatCommand::Register));
        assert_eq!(parse_command("/signup"), Some(ChatCommand::Register));
        assert_eq!(parse_command("/logout"), Some(ChatCommand::Logout));
        assert_eq!(parse_command("/whoami"), Some(ChatCommand::WhoAmI));
    }

    #[test]
    fn parse_open() {
        assert_eq!(
            parse_command("/open s1"),
            Some(ChatCommand::Open("s1".to_string()))
        );
        assert_eq!(
            parse_command("/load   s2  "),
            Some(ChatCommand::Open("s2".to_string()))
        );
        assert_eq!(
            parse_command("/open"),
            Some(ChatCommand::Invalid(
                "/open requires a session id".to_string()
            ))
        );
    }

    #[test]
    fn parse_delete() {
        assert_eq!(
            parse_command("/delete s1"),
            Some(ChatCommand::Delete("s1".to_string()))
        );
        assert_eq!(parse_command("/delete all"), Some(ChatCommand::DeleteAll));
        assert_eq!(parse_command("/delete ALL"), Some(ChatCommand::DeleteAll));
        assert!(matches!(
            parse_command("/delete"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("requires")
        ));
    }

    #[test]
    fn parse_sessions_aliases() {
        assert_eq!(parse_command("/sessions"), Some(ChatCommand::Sessions));
        assert_eq!(parse_command("/list"), Some(ChatCommand::Sessions));
    }

    #[test]
    fn parse_retry_and_copy() {
        assert_eq!(parse_command("/retry"), Some(ChatCommand::Retry));
        assert_eq!(parse_command("/copy"), Some(ChatCommand::Copy));
    }

    #[test]
    fn unknown_command() {
        assert!(matches!(
            parse_command("/frobnicate"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("/frobnicate")
        ));
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello there!"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(!help.is_empty());
        assert!(help.contains("/quit"));
        assert!(help.contains("/retry"));
        assert!(help.contains("/delete all"));
    }
}
