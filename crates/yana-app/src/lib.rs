//! Application layer for the Yana client.
//!
//! Pure state machines and a generic runtime for the conversational session,
//! enabling deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`Composer`]: conversation input state machine (quick replies, free text)
//! - [`RestoreController`]: boot-time restore protocol with version guard
//! - [`LifecycleBridge`]: background to active refresh trigger
//! - [`App`]: published stores and event dispatch
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod composer;
mod config;
mod driver;
mod event;
mod lifecycle;
pub mod notification;
mod restore;
mod reveal;
mod runtime;
mod signal;
mod system_env;

pub use action::AppAction;
pub use app::App;
pub use composer::{Composer, ComposerUiState, QuickReplyAxis, SubmitRejected};
pub use config::{
    AppConfig, BOOT_DELAY, ComposerConfig, MIN_SUPPORTED_VERSION_CODE, REVEAL_DURATION,
    REVEAL_STAGGER, RestoreConfig,
};
pub use driver::Driver;
pub use event::AppEvent;
pub use lifecycle::{AppStatus, LifecycleBridge};
pub use notification::{NotificationInbox, NotificationSender, PushNotification};
pub use restore::{PersistedBlobs, RestoreController, RestoreOutcome, RestoreReport, RestoredState};
pub use reveal::{RevealSequence, RevealStep, RevealTarget};
pub use runtime::Runtime;
pub use signal::DeferredSignal;
pub use system_env::SystemEnv;
