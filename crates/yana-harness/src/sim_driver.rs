//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` stands in for the platform in deterministic tests. It
//! implements [`Driver`] so the same [`yana_app::Runtime`] orchestration code
//! runs in both production and simulation. Every side effect the runtime asks
//! for is recorded for later inspection.
//!
//! Clones share state: keep one handle in the test and move the other into
//! the runtime.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use thiserror::Error;
use tokio::sync::Notify;
use yana_app::{App, AppEvent, Driver, RevealSequence};
use yana_core::ResponsePayload;
use yana_store::StorageKey;

use crate::invariants::{InvariantRegistry, SystemSnapshot};

/// Error type for simulation driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimDriverError {
    /// Messaging collaborator configured to be unreachable.
    #[error("messaging unavailable")]
    MessagingUnavailable,
    /// An invariant failed during render.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

/// Everything the runtime asked the platform to do.
#[derive(Debug, Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    submissions: Vec<ResponsePayload>,
    refresh_requests: usize,
    keyboard_dismissals: usize,
    reveals: Vec<RevealSequence>,
    reset_visible: bool,
    published: Vec<StorageKey>,
    splash_hidden: bool,
    renders: usize,
    stopped: bool,
    messaging_down: bool,
}

/// Simulation driver for deterministic testing.
#[derive(Clone)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    wake: Arc<Notify>,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SharedState::default())),
            wake: Arc::new(Notify::new()),
            invariants: None,
        }
    }

    /// Check invariants on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    #[allow(clippy::expect_used)]
    fn shared(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().expect("sim driver state poisoned")
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.shared().pending_events.push_back(event);
        self.wake.notify_one();
    }

    /// Inject a tick event.
    pub fn inject_tick(&self) {
        self.inject_event(AppEvent::Tick);
    }

    /// Make `submit_response` and refresh requests fail.
    pub fn set_messaging_down(&self, down: bool) {
        self.shared().messaging_down = down;
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        !self.shared().pending_events.is_empty()
    }

    /// Take all captured submissions.
    pub fn take_submissions(&self) -> Vec<ResponsePayload> {
        std::mem::take(&mut self.shared().submissions)
    }

    /// Take all captured reveal sequences.
    pub fn take_reveals(&self) -> Vec<RevealSequence> {
        std::mem::take(&mut self.shared().reveals)
    }

    /// Keys published so far, in order.
    pub fn published(&self) -> Vec<StorageKey> {
        self.shared().published.clone()
    }

    /// Number of conversation refreshes requested.
    pub fn refresh_requests(&self) -> usize {
        self.shared().refresh_requests
    }

    /// Number of keyboard dismissals.
    pub fn keyboard_dismissals(&self) -> usize {
        self.shared().keyboard_dismissals
    }

    /// Whether the reset affordance is currently shown.
    pub fn reset_visible(&self) -> bool {
        self.shared().reset_visible
    }

    /// Whether the splash screen was dismissed.
    pub fn splash_hidden(&self) -> bool {
        self.shared().splash_hidden
    }

    /// Number of renders.
    pub fn renders(&self) -> usize {
        self.shared().renders
    }

    /// Whether the runtime stopped the driver.
    pub fn stopped(&self) -> bool {
        self.shared().stopped
    }

    fn messaging(&self) -> Result<(), SimDriverError> {
        if self.shared().messaging_down { Err(SimDriverError::MessagingUnavailable) } else { Ok(()) }
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            let next = self.shared().pending_events.pop_front();
            if let Some(event) = next {
                return Ok(Some(event));
            }
            self.wake.notified().await;
        }
    }

    async fn submit_response(&mut self, payload: ResponsePayload) -> Result<(), Self::Error> {
        self.messaging()?;
        self.shared().submissions.push(payload);
        Ok(())
    }

    async fn request_conversation_refresh(&mut self) -> Result<(), Self::Error> {
        self.messaging()?;
        self.shared().refresh_requests += 1;
        Ok(())
    }

    fn dismiss_keyboard(&mut self) {
        self.shared().keyboard_dismissals += 1;
    }

    fn reveal(&mut self, sequence: &RevealSequence) {
        self.shared().reveals.push(sequence.clone());
    }

    fn set_reset_visible(&mut self, visible: bool) {
        self.shared().reset_visible = visible;
    }

    fn store_published(&mut self, key: StorageKey, _app: &App) {
        self.shared().published.push(key);
    }

    fn hide_splash(&mut self) {
        self.shared().splash_hidden = true;
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.shared().renders += 1;

        if let Some(registry) = &self.invariants {
            if let Err(violations) = registry.check_all(&SystemSnapshot::from_app(app)) {
                let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
                return Err(SimDriverError::Invariant(messages.join("; ")));
            }
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.shared().stopped = true;
    }
}
