//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from the platform:
//! the chat screen, the keyboard, the splash screen, and the messaging
//! collaborator. Each frontend implements the trait, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use yana_core::ResponsePayload;
use yana_store::StorageKey;

use crate::{App, AppEvent, RevealSequence};

/// Abstracts platform I/O for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in production and simulation.
///
/// # Implementations
///
/// - **Terminal**: the `yana` binary's headless driver
/// - **Simulation**: `yana_harness::SimDriver`, scripted events and recorded effects
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input event.
    ///
    /// Returns `None` if the source produced nothing usable this time.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Hand a response to the messaging collaborator.
    ///
    /// Fire-and-forget: delivery and failure come back later as chat updates.
    ///
    /// # Errors
    ///
    /// Returns an error only if the collaborator is unreachable.
    fn submit_response(
        &mut self,
        payload: ResponsePayload,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Ask the messaging collaborator to refresh the conversation.
    fn request_conversation_refresh(
        &mut self,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Drop text-entry focus.
    fn dismiss_keyboard(&mut self);

    /// Play a reveal sequence.
    fn reveal(&mut self, sequence: &RevealSequence);

    /// Show or hide the reset-conversation affordance.
    fn set_reset_visible(&mut self, visible: bool);

    /// A store slice was published.
    fn store_published(&mut self, key: StorageKey, app: &App);

    /// Dismiss the splash screen.
    fn hide_splash(&mut self);

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release platform resources.
    fn stop(&mut self);
}
