// Public modules
pub mod chat_session;
pub mod chat_turn;
pub mod credentials;
pub mod history;
pub mod identity;
pub mod message;
pub mod session_list;
pub mod timestamp;

// Re-exports
pub use chat_session::ChatSession;
pub use chat_turn::{ChatReply, ChatRequest};
pub use credentials::{LoginParams, RegisterForm, RegisterParams};
pub use history::SessionHistory;
pub use identity::UserIdentity;
pub use message::{Message, MessageRole};
pub use session_list::{DeleteAllResponse, NewSessionResponse, SessionListResponse};
