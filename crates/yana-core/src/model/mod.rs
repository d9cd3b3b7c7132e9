//! Published store slices.
//!
//! These are the shapes other components read by name (`session.token`,
//! `chat.quickReplies`, ...). Field names serialize in camelCase so persisted
//! blobs stay compatible with what earlier builds wrote.

mod chat;
mod lenient;
mod session;
mod ui;

pub use chat::{ChatState, QuickReply, ResponsePayload};
pub use session::{Route, SessionState};
pub use ui::{Banner, SettingsState, UiState};
