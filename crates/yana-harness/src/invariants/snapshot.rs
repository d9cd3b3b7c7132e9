//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the app at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use yana_app::App;
use yana_core::Route;

/// Snapshot of the whole app.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    /// Composer state. `None` while the chat screen is unmounted.
    pub composer: Option<ComposerSnapshot>,
    /// Published session token.
    pub session_token: String,
    /// Navigation branch shown.
    pub route: Option<Route>,
    /// Published chat still carries `userResponseFailed`.
    pub failure_flag_pending: bool,
    /// Published chat still carries `yanaMessagesDelivered`.
    pub delivery_flag_pending: bool,
}

impl SystemSnapshot {
    /// Create an empty snapshot (nothing mounted, signed out).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the observable state of an App.
    pub fn from_app(app: &App) -> Self {
        Self {
            composer: app.composer().map(|composer| {
                let ui = composer.ui();
                ComposerSnapshot {
                    reply_count: composer.quick_replies().len(),
                    reply_disabled: ui.reply_disabled,
                    reply_selected: ui.reply_selected_index,
                    submit_disabled: ui.submit_disabled,
                    submit_loading: ui.is_submit_loading,
                    quick_replies_visible: ui.is_quick_reply_visible,
                    input_len: ui.input_value.len(),
                }
            }),
            session_token: app.session().token.clone(),
            route: Some(app.route()),
            failure_flag_pending: app.chat().user_response_failed,
            delivery_flag_pending: app.chat().yana_messages_delivered,
        }
    }

    /// Create a snapshot holding only composer state.
    pub fn with_composer(composer: ComposerSnapshot) -> Self {
        Self { composer: Some(composer), ..Self::default() }
    }
}

/// Snapshot of a mounted composer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposerSnapshot {
    /// Number of quick replies offered.
    pub reply_count: usize,
    /// Quick replies ignore presses.
    pub reply_disabled: bool,
    /// Chosen quick reply.
    pub reply_selected: Option<usize>,
    /// Send button ignores presses.
    pub submit_disabled: bool,
    /// Text submission in flight.
    pub submit_loading: bool,
    /// Quick-reply row shown.
    pub quick_replies_visible: bool,
    /// Length of the free-text input in bytes.
    pub input_len: usize,
}

impl ComposerSnapshot {
    /// Snapshot of a freshly mounted composer with `reply_count` replies.
    pub fn mounted(reply_count: usize) -> Self {
        Self {
            reply_count,
            submit_disabled: true,
            quick_replies_visible: reply_count > 0,
            ..Self::default()
        }
    }
}
