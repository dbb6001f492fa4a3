//! Logging trait for backend client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to
//! capture and log the traffic passing through the [`Backend`] client.
//!
//! [`Backend`]: crate::Backend

use crate::types::{ChatReply, ChatRequest, ChatSession};

/// A trait for logging backend client operations.
///
/// Implement this trait to capture and record API interactions.
///
/// # Example
///
/// ```rust,ignore
/// use parley::ClientLogger;
/// use parley::types::{ChatReply, ChatRequest};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_chat(&self, request: &ChatRequest, reply: &ChatReply) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "{} -> {:?}", request.message, reply.reply).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a completed chat exchange.
    ///
    /// Called once per successful send with the request that was issued
    /// and the reply the server returned.
    fn log_chat(&self, request: &ChatRequest, reply: &ChatReply) {
        _ = request;
        _ = reply;
    }

    /// Log a session list refresh.
    fn log_sessions(&self, sessions: &[ChatSession]) {
        _ = sessions;
    }

    /// Log a request failure.
    ///
    /// Called with the endpoint path and the rendered error for any
    /// request that did not produce a success response.
    fn log_failure(&self, endpoint: &str, error: &str) {
        _ = endpoint;
        _ = error;
    }
}
