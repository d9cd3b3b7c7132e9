//! Core model for the Yana client.
//!
//! Plain data types shared by the persistence layer and the application state
//! machines: the persisted session/chat/settings/ui slices, the error taxonomy,
//! and the [`Environment`] abstraction over time.
//!
//! Nothing in this crate performs I/O.

#![forbid(unsafe_code)]

pub mod env;
pub mod error;
pub mod model;

pub use env::Environment;
pub use error::{RestoreError, ValidationError};
pub use model::{
    Banner, ChatState, QuickReply, ResponsePayload, Route, SessionState, SettingsState, UiState,
};
