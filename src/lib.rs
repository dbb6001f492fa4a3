// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod markup;
pub mod observability;
pub mod render;
pub mod state;
pub mod transcript;
pub mod types;

// Re-exports
pub use client::Backend;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use render::{AnsiRenderer, Renderer};
pub use state::{AuthState, ClientState};
pub use transcript::{Transcript, TranscriptEntry};
pub use types::*;
