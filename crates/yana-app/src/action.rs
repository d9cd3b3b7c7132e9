//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use yana_core::ResponsePayload;
use yana_store::StorageKey;

use crate::RevealSequence;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Hand a response to the messaging collaborator (fire-and-forget).
    SubmitResponse(ResponsePayload),

    /// Drop text-entry focus.
    DismissKeyboard,

    /// Play the quick-reply reveal sequence.
    Reveal(RevealSequence),

    /// Show or hide the reset-conversation affordance.
    SetResetVisible(bool),

    /// Ask the messaging collaborator to refresh the conversation.
    RequestConversationRefresh,

    /// Wipe every persisted key.
    ClearPersistence,

    /// A store slice changed; notify observers.
    Publish(StorageKey),

    /// Write a store slice back to persistence.
    Persist(StorageKey),

    /// Boot finished; dismiss the splash screen.
    HideSplash,
}
