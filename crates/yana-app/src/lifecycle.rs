//! Foreground/background lifecycle bridge.
//!
//! Returning to the foreground from the background asks the messaging
//! collaborator to refresh the conversation, but only for an authenticated
//! session. The token is passed in on every transition so the decision always
//! uses the current session, never one captured at attach time.

use tracing::debug;

/// Platform application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppStatus {
    /// In the foreground and receiving input.
    #[default]
    Active,
    /// Not visible.
    Background,
    /// Visible but not receiving input (call overlay, app switcher).
    Inactive,
    /// Status could not be determined.
    Unknown,
    /// Running as an app extension.
    Extension,
}

impl AppStatus {
    /// True for statuses that count as "away" for refresh purposes.
    pub fn is_background(self) -> bool {
        matches!(self, Self::Background)
    }
}

/// Tracks the previous status and detects background to active edges.
#[derive(Debug, Clone)]
pub struct LifecycleBridge {
    previous: AppStatus,
    attached: bool,
}

impl LifecycleBridge {
    /// Attach with the status observed at mount time.
    pub fn attach(initial: AppStatus) -> Self {
        Self { previous: initial, attached: true }
    }

    /// Record a status change.
    ///
    /// Returns true if a conversation refresh must be requested: the previous
    /// status was background, the next one is active, and `token` is
    /// non-empty.
    pub fn transition(&mut self, next: AppStatus, token: &str) -> bool {
        if !self.attached {
            debug!(?next, "status change after detach ignored");
            return false;
        }

        let resumed = self.previous.is_background() && next == AppStatus::Active;
        self.previous = next;

        if resumed && token.is_empty() {
            debug!("resumed without a session, no refresh");
        }
        resumed && !token.is_empty()
    }

    /// Stop reacting to status changes.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// False once detached.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Last recorded status.
    pub fn status(&self) -> AppStatus {
        self.previous
    }
}

impl Default for LifecycleBridge {
    fn default() -> Self {
        Self::attach(AppStatus::Active)
    }
}
