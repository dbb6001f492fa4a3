//! Interactive chat support.
//!
//! This module provides the pieces the chat binaries are built from:
//!
//! - [`ChatController`]: the send/receive state machine over a [`Backend`]
//! - [`ChatConfig`] and [`Profile`]: configuration and saved settings
//! - [`parse_command`]: slash command parsing
//!
//! [`Backend`]: crate::Backend

pub mod commands;
pub mod config;
pub mod controller;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, Profile};
pub use controller::{AlwaysConfirm, ChatController, Confirmation, SendOutcome};
