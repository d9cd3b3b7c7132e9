//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use yana_core::Route;

use super::{ComposerSnapshot, Invariant, InvariantResult, SystemSnapshot, Violation};

fn check_composer(
    name: &'static str,
    state: &SystemSnapshot,
    holds: impl FnOnce(&ComposerSnapshot) -> Result<(), String>,
) -> InvariantResult {
    match &state.composer {
        Some(composer) => holds(composer).map_err(|message| Violation { invariant: name, message }),
        None => Ok(()),
    }
}

/// A chosen reply locks the whole quick-reply row.
///
/// If `reply_selected` is `Some`, `reply_disabled` must be true. Otherwise a
/// second press could send a second response for the same turn.
pub struct SelectionLocksReplies;

impl Invariant for SelectionLocksReplies {
    fn name(&self) -> &'static str {
        "selection_locks_replies"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        check_composer(self.name(), state, |c| match c.reply_selected {
            Some(index) if !c.reply_disabled => {
                Err(format!("reply {index} selected but replies still enabled"))
            },
            _ => Ok(()),
        })
    }
}

/// The chosen reply must exist.
pub struct SelectionInRange;

impl Invariant for SelectionInRange {
    fn name(&self) -> &'static str {
        "selection_in_range"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        check_composer(self.name(), state, |c| match c.reply_selected {
            Some(index) if index >= c.reply_count => {
                Err(format!("reply {index} selected out of {}", c.reply_count))
            },
            _ => Ok(()),
        })
    }
}

/// While a reply is chosen, free text cannot be sent.
pub struct ReplyLockDisablesSubmit;

impl Invariant for ReplyLockDisablesSubmit {
    fn name(&self) -> &'static str {
        "reply_lock_disables_submit"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        check_composer(self.name(), state, |c| {
            if c.reply_disabled && !c.submit_disabled {
                Err("submit enabled while a reply is chosen".to_string())
            } else {
                Ok(())
            }
        })
    }
}

/// An enabled send button always has text behind it.
pub struct SubmitNeedsText;

impl Invariant for SubmitNeedsText {
    fn name(&self) -> &'static str {
        "submit_needs_text"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        check_composer(self.name(), state, |c| {
            if !c.submit_disabled && c.input_len == 0 {
                Err("submit enabled with empty input".to_string())
            } else {
                Ok(())
            }
        })
    }
}

/// A shown quick-reply row is never empty.
pub struct VisibleRepliesExist;

impl Invariant for VisibleRepliesExist {
    fn name(&self) -> &'static str {
        "visible_replies_exist"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        check_composer(self.name(), state, |c| {
            if c.quick_replies_visible && c.reply_count == 0 {
                Err("quick-reply row visible with no replies".to_string())
            } else {
                Ok(())
            }
        })
    }
}

/// Messaging edge flags never linger in the published chat store.
///
/// Each rising edge is acted on once and reset. A lingering flag would make
/// the next identical update look like "no change" and swallow an edge.
pub struct EdgeFlagsConsumed;

impl Invariant for EdgeFlagsConsumed {
    fn name(&self) -> &'static str {
        "edge_flags_consumed"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if state.failure_flag_pending || state.delivery_flag_pending {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "flags left set: failed={} delivered={}",
                    state.failure_flag_pending, state.delivery_flag_pending
                ),
            });
        }
        Ok(())
    }
}

/// Navigation branch follows the session token.
pub struct RouteFollowsToken;

impl Invariant for RouteFollowsToken {
    fn name(&self) -> &'static str {
        "route_follows_token"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(route) = state.route else {
            return Ok(());
        };

        let expected = Route::for_token(&state.session_token);
        if route == expected {
            Ok(())
        } else {
            Err(Violation {
                invariant: self.name(),
                message: format!("route {route:?} but token implies {expected:?}"),
            })
        }
    }
}
