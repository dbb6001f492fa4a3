//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction so the
//! controller never touches a terminal directly. The default
//! implementation paints message bubbles with ANSI styling; a plain
//! variant suits piped output and tests.

use std::io::{self, Stdout, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::markup;
use crate::transcript::TranscriptEntry;
use crate::types::{ChatSession, MessageRole};

/// ANSI escape code for dim text (used for timestamps and hints).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for user labels).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for assistant labels).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for error bubbles).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for erasing the current line.
const ANSI_ERASE_LINE: &str = "\r\x1b[2K";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - ANSI-styled terminal output
/// - Plain text without styling (for piping/redirecting)
/// - TUI rendering
pub trait Renderer: Send {
    /// Paint one message bubble.
    fn message(&mut self, entry: &TranscriptEntry);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print an error message outside the transcript (command failures,
    /// input errors).
    fn print_error(&mut self, error: &str);

    /// Show the loading indicator. Idempotent.
    fn show_loading(&mut self);

    /// Hide the loading indicator. Idempotent.
    fn hide_loading(&mut self);

    /// Paint the empty-state placeholder.
    fn empty_state(&mut self);

    /// Paint the session list, highlighting the active entry.
    fn session_list(&mut self, sessions: &[ChatSession], active: Option<&str>);

    /// Copy text to the clipboard and acknowledge.
    fn copy(&mut self, text: &str);
}

/// Terminal renderer with optional ANSI styling.
pub struct AnsiRenderer {
    stdout: Stdout,
    use_color: bool,
    loading_shown: bool,
}

impl AnsiRenderer {
    /// Creates a renderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
            loading_shown: false,
        }
    }

    /// Creates a renderer with the specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            loading_shown: false,
        }
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn role_color(role: MessageRole) -> &'static str {
        match role {
            MessageRole::User => ANSI_CYAN,
            MessageRole::Assistant => ANSI_GREEN,
            MessageRole::Error => ANSI_RED,
        }
    }
}

impl Default for AnsiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats an entry timestamp as HH:MM.
fn format_time(when: OffsetDateTime) -> String {
    let format = format_description!("[hour]:[minute]");
    when.format(&format).unwrap_or_default()
}

impl Renderer for AnsiRenderer {
    fn message(&mut self, entry: &TranscriptEntry) {
        self.hide_loading();
        let label = entry.role.label();
        let time = format_time(entry.created_at);

        if self.use_color {
            let color = Self::role_color(entry.role);
            println!("{color}{label}{ANSI_RESET} {ANSI_DIM}{time}{ANSI_RESET}");
        } else {
            println!("{label} {time}");
        }

        // Markup translation applies to assistant text only; user input and
        // error text render verbatim.
        match entry.role {
            MessageRole::Assistant => {
                let spans = markup::parse(&entry.content);
                println!("{}", markup::render_ansi(&spans, self.use_color));
            }
            MessageRole::User => println!("{}", entry.content),
            MessageRole::Error => {
                if self.use_color {
                    println!("{ANSI_RED}{}{ANSI_RESET}", entry.content);
                } else {
                    println!("{}", entry.content);
                }
            }
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        self.hide_loading();
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.hide_loading();
        if self.use_color {
            eprintln!("{ANSI_RED}Error:{ANSI_RESET} {error}");
        } else {
            eprintln!("Error: {error}");
        }
    }

    fn show_loading(&mut self) {
        if self.loading_shown {
            return;
        }
        self.loading_shown = true;
        if self.use_color {
            print!("{ANSI_DIM}AI is thinking...{ANSI_RESET}");
        } else {
            println!("AI is thinking...");
        }
        self.flush();
    }

    fn hide_loading(&mut self) {
        if !self.loading_shown {
            return;
        }
        self.loading_shown = false;
        if self.use_color {
            print!("{ANSI_ERASE_LINE}");
            self.flush();
        }
    }

    fn empty_state(&mut self) {
        self.hide_loading();
        if self.use_color {
            println!("{ANSI_DIM}Start a conversation by typing a message below.{ANSI_RESET}");
        } else {
            println!("Start a conversation by typing a message below.");
        }
        self.flush();
    }

    fn session_list(&mut self, sessions: &[ChatSession], active: Option<&str>) {
        self.hide_loading();
        if sessions.is_empty() {
            println!("No chat history yet");
            self.flush();
            return;
        }
        for session in sessions {
            let marker = if active == Some(session.session_id.as_str()) {
                "*"
            } else {
                " "
            };
            let title = session.display_title();
            if self.use_color {
                println!(
                    "{marker} {title} {ANSI_DIM}({}){ANSI_RESET}",
                    session.session_id
                );
            } else {
                println!("{marker} {title} ({})", session.session_id);
            }
        }
        self.flush();
    }

    fn copy(&mut self, text: &str) {
        self.hide_loading();
        // OSC 52: ask the terminal to place the payload on the clipboard.
        print!("\x1b]52;c;{}\x07", BASE64.encode(text));
        if self.use_color {
            println!("{ANSI_GREEN}Copied!{ANSI_RESET}");
        } else {
            println!("Copied!");
        }
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_default_has_color() {
        let renderer = AnsiRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = AnsiRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn role_colors_distinct() {
        assert_ne!(
            AnsiRenderer::role_color(MessageRole::User),
            AnsiRenderer::role_color(MessageRole::Error)
        );
    }

    #[test]
    fn time_format() {
        use time::macros::datetime;
        assert_eq!(format_time(datetime!(2025-02-19 09:05:00 UTC)), "09:05");
    }
}
