//! One-shot session management for a parley server.
//!
//! # Usage
//!
//! ```bash
//! # List sessions
//! parley-sessions --username ada list
//!
//! # Show one session's history
//! parley-sessions --username ada show <session-id>
//!
//! # Delete one session, or everything
//! parley-sessions --username ada delete <session-id>
//! parley-sessions --username ada --yes delete-all
//! ```
//!
//! The password is read from the PARLEY_PASSWORD environment variable.

use std::io::{self, BufRead, Write};

use arrrg::CommandLine;

use parley::chat::{AlwaysConfirm, ChatController, Confirmation};
use parley::{AnsiRenderer, Backend, LoginParams, Renderer};

#[derive(arrrg_derive::CommandLine, Debug, Default, PartialEq, Eq)]
struct SessionArgs {
    #[arrrg(optional, "Server URL (default: $PARLEY_SERVER_URL)", "URL")]
    server: Option<String>,

    #[arrrg(optional, "Sign in as this user (password from $PARLEY_PASSWORD)", "USER")]
    username: Option<String>,

    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECS")]
    timeout: Option<u64>,

    #[arrrg(flag, "Skip confirmation prompts")]
    yes: bool,

    #[arrrg(flag, "Disable ANSI colors/styles")]
    no_color: bool,
}

/// Asks on stdin; anything but y/yes declines.
struct StdinConfirm;

impl Confirmation for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

const USAGE: &str = "parley-sessions [OPTIONS] <list | show <id> | delete <id> | delete-all>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = SessionArgs::from_command_line_relaxed(USAGE);

    let timeout = args.timeout.map(std::time::Duration::from_secs);
    let client = Backend::with_options(args.server.clone(), timeout)?;
    let mut controller = ChatController::new(client);
    let mut renderer = AnsiRenderer::with_color(!args.no_color);

    if let Some(username) = &args.username {
        let password = std::env::var("PARLEY_PASSWORD")
            .map_err(|_| "PARLEY_PASSWORD environment variable not set")?;
        let params = LoginParams {
            username: username.clone(),
            password,
        };
        controller.login(&params).await?;
    } else if !controller.check_auth().await? {
        return Err("not signed in; pass --username and set PARLEY_PASSWORD".into());
    }

    let mut confirm: Box<dyn Confirmation> = if args.yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(StdinConfirm)
    };

    let free: Vec<&str> = free.iter().map(String::as_str).collect();
    match free.as_slice() {
        [] | ["list"] => {
            controller.refresh_sessions().await;
            renderer.session_list(controller.sessions(), None);
        }
        ["show", session_id] => {
            controller.open_session(session_id).await?;
            if controller.transcript().is_empty() {
                renderer.empty_state();
            }
            let entries = controller.transcript().entries().to_vec();
            for entry in &entries {
                renderer.message(entry);
            }
        }
        ["delete", session_id] => {
            if controller.delete_session(session_id, &mut *confirm).await? {
                renderer.print_info("Session deleted.");
            } else {
                renderer.print_info("Not deleted.");
            }
        }
        ["delete-all"] | ["delete", "all"] => {
            match controller.delete_all_sessions(&mut *confirm).await? {
                Some(count) => renderer.print_info(&format!("Deleted {count} sessions.")),
                None => renderer.print_info("Not deleted."),
            }
        }
        _ => {
            return Err(format!("usage: {USAGE}").into());
        }
    }

    Ok(())
}
