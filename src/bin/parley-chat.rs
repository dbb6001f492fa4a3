//! Interactive chat application backed by a parley server.
//!
//! This binary provides a REPL interface for chatting: sign in, send
//! messages, and manage chat sessions from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage, server from $PARLEY_SERVER_URL
//! parley-chat
//!
//! # Point at a server explicitly
//! parley-chat --server http://localhost:8000
//!
//! # Disable colors (useful for piping output)
//! parley-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/login` / `/logout` - Sign in and out
//! - `/new` - Start a new chat session
//! - `/sessions` - List sessions
//! - `/open <id>` - Open a session and show its history
//! - `/delete <id>` / `/delete all` - Delete sessions
//! - `/retry` - Resend the last message
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use parley::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatController, Confirmation, help_text, parse_command,
};
use parley::{AnsiRenderer, Backend, Renderer};

/// Asks a yes/no question on the prompt line; anything but y/yes declines.
struct ReadlineConfirm<'a> {
    rl: &'a mut DefaultEditor,
}

impl Confirmation for ReadlineConfirm<'_> {
    fn confirm(&mut self, prompt: &str) -> bool {
        match self.rl.readline(&format!("{prompt} [y/N] ")) {
            Ok(line) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

fn prompt(rl: &mut DefaultEditor, label: &str) -> Option<String> {
    match rl.readline(label) {
        Ok(line) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

async fn do_login(
    rl: &mut DefaultEditor,
    controller: &mut ChatController,
    renderer: &mut AnsiRenderer,
) {
    let Some(username) = prompt(rl, "Username: ") else {
        return;
    };
    let Some(password) = prompt(rl, "Password: ") else {
        return;
    };
    let params = parley::LoginParams { username, password };
    match controller.login(&params).await {
        Ok(()) => {
            let name = controller
                .state()
                .auth
                .user_name
                .clone()
                .unwrap_or_default();
            renderer.print_info(&format!("Signed in as {name}."));
            controller.refresh_sessions().await;
        }
        Err(err) => renderer.print_error(&format!("Login failed: {err}")),
    }
}

async fn do_register(
    rl: &mut DefaultEditor,
    controller: &mut ChatController,
    renderer: &mut AnsiRenderer,
) {
    let Some(username) = prompt(rl, "Username: ") else {
        return;
    };
    let Some(email) = prompt(rl, "Email: ") else {
        return;
    };
    let Some(password) = prompt(rl, "Password: ") else {
        return;
    };
    let Some(confirm_password) = prompt(rl, "Confirm password: ") else {
        return;
    };
    let accepted_terms = ReadlineConfirm { rl }.confirm("Accept the terms of service?");
    let form = parley::RegisterForm {
        username,
        email,
        password,
        confirm_password,
        accepted_terms,
    };
    match controller.register(form).await {
        Ok(()) => renderer.print_info("Account created. Use /login to sign in."),
        Err(err) => renderer.print_error(&format!("Registration failed: {err}")),
    }
}

/// Main entry point for the parley-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("parley-chat [OPTIONS]");
    let config = ChatConfig::resolve(args)?;

    let client = Backend::with_options(config.server_url.clone(), config.timeout)?;
    let mut controller = ChatController::new(client).with_screening(config.screen_replies);
    let mut renderer = AnsiRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    match controller.check_auth().await {
        Ok(true) => {
            let name = controller
                .state()
                .auth
                .user_name
                .clone()
                .unwrap_or_default();
            renderer.print_info(&format!("Welcome back, {name}."));
            controller.refresh_sessions().await;
        }
        Ok(false) => renderer.print_info("Not signed in. Use /login to sign in."),
        Err(err) => renderer.print_error(&format!("Could not reach the server: {err}")),
    }
    println!("Type /help for commands, /quit to exit\n");
    if controller.transcript().is_empty() {
        renderer.empty_state();
    }

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Login => {
                            do_login(&mut rl, &mut controller, &mut renderer).await;
                        }
                        ChatCommand::Register => {
                            do_register(&mut rl, &mut controller, &mut renderer).await;
                        }
                        ChatCommand::Logout => {
                            controller.logout().await;
                            renderer.print_info("Signed out.");
                        }
                        ChatCommand::WhoAmI => match &controller.state().auth.user_name {
                            Some(name) => renderer.print_info(&format!("Signed in as {name}.")),
                            None => renderer.print_info("Not signed in."),
                        },
                        ChatCommand::New => match controller.new_session().await {
                            Ok(session_id) => {
                                renderer.print_info(&format!("Started session {session_id}."));
                                renderer.empty_state();
                            }
                            Err(err) => {
                                renderer.print_error(&format!("Could not start a session: {err}"))
                            }
                        },
                        ChatCommand::Sessions => {
                            controller.refresh_sessions().await;
                            let active = controller.state().current_session_id().map(String::from);
                            renderer
                                .session_list(controller.sessions(), active.as_deref());
                        }
                        ChatCommand::Open(session_id) => {
                            match controller.open_session(&session_id).await {
                                Ok(()) => {
                                    if controller.transcript().is_empty() {
                                        renderer.empty_state();
                                    }
                                    let entries = controller.transcript().entries().to_vec();
                                    for entry in &entries {
                                        renderer.message(entry);
                                    }
                                }
                                Err(err) => renderer
                                    .print_error(&format!("Could not open session: {err}")),
                            }
                        }
                        ChatCommand::Delete(session_id) => {
                            let mut confirm = ReadlineConfirm { rl: &mut rl };
                            match controller.delete_session(&session_id, &mut confirm).await {
                                Ok(true) => renderer.print_info("Session deleted."),
                                Ok(false) => renderer.print_info("Not deleted."),
                                Err(err) => renderer
                                    .print_error(&format!("Could not delete session: {err}")),
                            }
                        }
                        ChatCommand::DeleteAll => {
                            let mut confirm = ReadlineConfirm { rl: &mut rl };
                            match controller.delete_all_sessions(&mut confirm).await {
                                Ok(Some(count)) => {
                                    renderer.print_info(&format!("Deleted {count} sessions."))
                                }
                                Ok(None) => renderer.print_info("Not deleted."),
                                Err(err) => renderer
                                    .print_error(&format!("Could not delete sessions: {err}")),
                            }
                        }
                        ChatCommand::Retry => {
                            controller.retry(&mut renderer).await;
                        }
                        ChatCommand::Copy => {
                            match controller.transcript().entries().last() {
                                Some(entry) => {
                                    let text = entry.content.clone();
                                    renderer.copy(&text);
                                }
                                None => renderer.print_error("Nothing to copy"),
                            }
                        }
                        ChatCommand::Invalid(msg) => {
                            renderer.print_error(&msg);
                        }
                    }
                    continue;
                }

                controller.send(line, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {err}"));
                break;
            }
        }
    }

    Ok(())
}
