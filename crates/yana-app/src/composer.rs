//! Conversation input state machine.
//!
//! One [`Composer`] exists per mounted chat screen. It owns three axes:
//!
//! - Quick replies: hidden, visible, or disabled after a choice.
//! - Free-text submit: disabled or enabled.
//! - Loading: idle or loading while a text submission is in flight.
//!
//! The composer never performs I/O. Every transition returns the
//! [`AppAction`]s the runtime must execute.

use thiserror::Error;
use tracing::{debug, warn};
use yana_core::{ChatState, QuickReply, ResponsePayload, ValidationError};

use crate::{AppAction, ComposerConfig, RevealSequence};

/// Observable composer state, mirrored to the chat screen on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerUiState {
    /// A quick reply was chosen; all quick replies ignore presses.
    pub reply_disabled: bool,
    /// Index of the chosen quick reply.
    pub reply_selected_index: Option<usize>,
    /// Send button ignores presses.
    pub submit_disabled: bool,
    /// A text submission is in flight.
    pub is_submit_loading: bool,
    /// Quick-reply row is shown.
    pub is_quick_reply_visible: bool,
    /// Reset-conversation affordance is shown.
    pub reset_visible: bool,
    /// Current free-text input.
    pub input_value: String,
    /// Inline validation message for the input.
    pub input_error: Option<ValidationError>,
}

/// Quick-reply axis as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickReplyAxis {
    /// Not shown.
    Hidden,
    /// Shown and pressable.
    Visible,
    /// Shown, a reply was chosen, presses are ignored.
    Disabled,
}

/// Submission rejected by validation.
///
/// Carries the actions that surface the error: the reveal sequence and the
/// reset affordance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("submission rejected: {error}")]
pub struct SubmitRejected {
    /// Validation failure.
    #[source]
    pub error: ValidationError,
    /// Actions that surface the error.
    pub actions: Vec<AppAction>,
}

/// Per-mount conversation input state machine.
#[derive(Debug, Clone)]
pub struct Composer {
    config: ComposerConfig,
    quick_replies: Vec<QuickReply>,
    next_key: String,
    placeholder: String,
    default_value: String,
    ui: ComposerUiState,
    /// Quick replies were shown by a validation error and stay shown while
    /// the user types, until the next turn.
    revealed_by_error: bool,
}

impl Composer {
    /// Mount a composer for the given chat slice.
    ///
    /// Quick replies start visible iff there are any. Submit starts disabled.
    pub fn mount(chat: &ChatState, config: ComposerConfig) -> Self {
        let ui = ComposerUiState {
            reply_disabled: false,
            reply_selected_index: None,
            submit_disabled: true,
            is_submit_loading: false,
            is_quick_reply_visible: !chat.quick_replies.is_empty(),
            reset_visible: false,
            input_value: String::new(),
            input_error: None,
        };

        Self {
            config,
            quick_replies: chat.quick_replies.clone(),
            next_key: chat.next_key.clone(),
            placeholder: chat.input_placeholder.clone(),
            default_value: chat.input_default_value.clone(),
            ui,
            revealed_by_error: false,
        }
    }

    /// Pick up same-turn changes to the chat slice (labels, placeholder).
    pub fn sync(&mut self, chat: &ChatState) {
        self.quick_replies.clone_from(&chat.quick_replies);
        self.placeholder.clone_from(&chat.input_placeholder);
        self.default_value.clone_from(&chat.input_default_value);

        if self.ui.reply_selected_index.is_some_and(|i| i >= self.quick_replies.len()) {
            self.ui.reply_selected_index = None;
        }
        if self.quick_replies.is_empty() {
            self.ui.is_quick_reply_visible = false;
        }
    }

    /// Free-text input changed.
    ///
    /// Empty or whitespace-only input raises a validation error, which
    /// disables submit and reveals the quick replies. Valid input clears the
    /// error and, while no quick reply is chosen, enables submit.
    pub fn set_input(&mut self, text: impl Into<String>) -> Vec<AppAction> {
        self.ui.input_value = text.into();

        match ValidationError::check(&self.ui.input_value) {
            Err(error) => self.raise(error),
            Ok(()) => {
                self.ui.input_error = None;
                self.enable_submit()
            },
        }
    }

    /// User pressed the quick reply at `index`.
    ///
    /// The first press disables every quick reply and submit, records the
    /// choice, and emits the response. Later presses are ignored until a
    /// submission failure or a new turn.
    pub fn select_reply(&mut self, index: usize) -> Vec<AppAction> {
        if self.ui.reply_disabled {
            debug!(index, "quick reply ignored, a reply is already chosen");
            return vec![];
        }

        let Some(reply) = self.quick_replies.get(index) else {
            warn!(index, count = self.quick_replies.len(), "quick reply index out of range");
            return vec![];
        };
        let payload = reply.to_payload();

        self.ui.reply_selected_index = Some(index);
        self.ui.reply_disabled = true;
        self.ui.submit_disabled = true;

        vec![AppAction::SubmitResponse(payload)]
    }

    /// User pressed send with `input`.
    ///
    /// Ignored while a submission is in flight or a quick reply is chosen.
    pub fn submit_text(&mut self, input: &str) -> Result<Vec<AppAction>, SubmitRejected> {
        if self.ui.is_submit_loading || self.ui.reply_disabled {
            debug!(
                loading = self.ui.is_submit_loading,
                reply_disabled = self.ui.reply_disabled,
                "submit ignored"
            );
            return Ok(vec![]);
        }

        input.clone_into(&mut self.ui.input_value);
        if let Err(error) = ValidationError::check(input) {
            let actions = self.raise(error);
            return Err(SubmitRejected { error, actions });
        }

        self.ui.input_error = None;
        self.ui.is_submit_loading = true;
        self.ui.submit_disabled = true;

        let payload = ResponsePayload {
            event_name: None,
            next_key: self.next_key.clone(),
            user_response: input.to_string(),
        };

        Ok(vec![AppAction::DismissKeyboard, AppAction::SubmitResponse(payload)])
    }

    /// Submit whatever is currently in the input.
    pub fn submit_current(&mut self) -> Result<Vec<AppAction>, SubmitRejected> {
        let input = self.ui.input_value.clone();
        self.submit_text(&input)
    }

    /// Assistant messages for this turn finished arriving.
    ///
    /// Shows the quick replies (when there are any) and plays the staggered
    /// reveal, input row last.
    pub fn on_delivery_ack(&mut self) -> Vec<AppAction> {
        self.ui.is_quick_reply_visible = !self.quick_replies.is_empty();
        self.revealed_by_error = false;

        vec![AppAction::Reveal(self.reveal_sequence())]
    }

    /// The last submission did not reach the assistant.
    ///
    /// Re-enables every quick reply and, when the input holds text, submit.
    pub fn on_submission_failed(&mut self) -> Vec<AppAction> {
        self.ui.reply_disabled = false;
        self.ui.reply_selected_index = None;
        self.ui.is_submit_loading = false;
        if !self.ui.input_value.is_empty() {
            self.ui.submit_disabled = false;
        }
        vec![]
    }

    fn raise(&mut self, error: ValidationError) -> Vec<AppAction> {
        self.ui.input_error = Some(error);
        self.ui.submit_disabled = true;
        self.ui.is_quick_reply_visible = !self.quick_replies.is_empty();
        self.revealed_by_error = self.ui.is_quick_reply_visible;

        let mut actions = vec![AppAction::Reveal(self.reveal_sequence())];
        if !self.ui.reset_visible {
            self.ui.reset_visible = true;
            actions.push(AppAction::SetResetVisible(true));
        }
        actions
    }

    fn enable_submit(&mut self) -> Vec<AppAction> {
        if !self.ui.submit_disabled || self.ui.reply_disabled {
            return vec![];
        }

        self.ui.submit_disabled = false;
        if !self.revealed_by_error {
            self.ui.is_quick_reply_visible = false;
        }

        if self.ui.reset_visible {
            self.ui.reset_visible = false;
            vec![AppAction::SetResetVisible(false)]
        } else {
            vec![]
        }
    }

    fn reveal_sequence(&self) -> RevealSequence {
        RevealSequence::staggered(
            self.quick_replies.len(),
            self.config.reveal_stagger,
            self.config.reveal_duration,
        )
    }

    /// Observable state.
    pub fn ui(&self) -> &ComposerUiState {
        &self.ui
    }

    /// Quick replies for the current turn.
    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.quick_replies
    }

    /// Turn this composer was mounted for.
    pub fn next_key(&self) -> &str {
        &self.next_key
    }

    /// Placeholder to show, falling back to the configured default.
    pub fn placeholder(&self) -> &str {
        if self.placeholder.is_empty() {
            &self.config.default_placeholder
        } else {
            &self.placeholder
        }
    }

    /// Text pre-filled by the assistant.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Quick-reply axis.
    pub fn quick_reply_axis(&self) -> QuickReplyAxis {
        if !self.ui.is_quick_reply_visible || self.quick_replies.is_empty() {
            QuickReplyAxis::Hidden
        } else if self.ui.reply_disabled {
            QuickReplyAxis::Disabled
        } else {
            QuickReplyAxis::Visible
        }
    }

    /// True if the send button accepts presses.
    pub fn can_submit(&self) -> bool {
        !self.ui.submit_disabled && !self.ui.is_submit_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RevealTarget;

    fn chat(replies: usize) -> ChatState {
        ChatState {
            next_key: "mood_check".into(),
            input_placeholder: "How are you?".into(),
            quick_replies: (0..replies)
                .map(|i| QuickReply::new(format!("reply {i}"), format!("next_{i}")))
                .collect(),
            ..ChatState::default()
        }
    }

    fn mount(replies: usize) -> Composer {
        Composer::mount(&chat(replies), ComposerConfig::default())
    }

    #[test]
    fn mount_with_replies_shows_them() {
        let composer = mount(2);

        assert_eq!(composer.quick_reply_axis(), QuickReplyAxis::Visible);
        assert!(composer.ui().submit_disabled);
        assert!(!composer.ui().is_submit_loading);
        assert_eq!(composer.ui().reply_selected_index, None);
    }

    #[test]
    fn mount_without_replies_hides_them() {
        let composer = mount(0);

        assert_eq!(composer.quick_reply_axis(), QuickReplyAxis::Hidden);
        assert!(!composer.ui().is_quick_reply_visible);
    }

    #[test]
    fn select_reply_emits_payload_once() {
        let mut composer = mount(3);

        let actions = composer.select_reply(1);
        assert_eq!(actions, vec![AppAction::SubmitResponse(ResponsePayload {
            event_name: None,
            next_key: "next_1".into(),
            user_response: "reply 1".into(),
        })]);
        assert_eq!(composer.ui().reply_selected_index, Some(1));
        assert_eq!(composer.quick_reply_axis(), QuickReplyAxis::Disabled);

        assert!(composer.select_reply(2).is_empty());
        assert_eq!(composer.ui().reply_selected_index, Some(1));
    }

    #[test]
    fn select_reply_out_of_range_is_ignored() {
        let mut composer = mount(1);

        assert!(composer.select_reply(5).is_empty());
        assert!(!composer.ui().reply_disabled);
    }

    #[test]
    fn select_reply_carries_event_name() {
        let mut chat = chat(0);
        chat.quick_replies.push(QuickReply::new("Yes", "after_yes").with_event("consent"));
        let mut composer = Composer::mount(&chat, ComposerConfig::default());

        let actions = composer.select_reply(0);
        assert!(matches!(
            &actions[..],
            [AppAction::SubmitResponse(p)] if p.event_name.as_deref() == Some("consent")
        ));
    }

    #[test]
    fn submit_whitespace_is_rejected() {
        let mut composer = mount(2);

        let rejected = composer.submit_text("   ").unwrap_err();
        assert_eq!(rejected.error, ValidationError::Empty);
        assert!(rejected.actions.iter().any(|a| matches!(a, AppAction::Reveal(_))));
        assert!(rejected.actions.contains(&AppAction::SetResetVisible(true)));

        assert!(!composer.ui().is_submit_loading);
        assert!(composer.ui().submit_disabled);
        assert_eq!(composer.quick_reply_axis(), QuickReplyAxis::Visible);
        assert_eq!(composer.ui().input_error, Some(ValidationError::Empty));
    }

    #[test]
    fn submit_valid_text() {
        let mut composer = mount(2);
        composer.set_input("hello");

        let actions = composer.submit_text("hello").unwrap();
        assert_eq!(actions, vec![
            AppAction::DismissKeyboard,
            AppAction::SubmitResponse(ResponsePayload {
                event_name: None,
                next_key: "mood_check".into(),
                user_response: "hello".into(),
            }),
        ]);
        assert!(composer.ui().is_submit_loading);
        assert!(composer.ui().submit_disabled);
    }

    #[test]
    fn submit_while_loading_is_ignored() {
        let mut composer = mount(0);
        composer.submit_text("first").unwrap();

        assert_eq!(composer.submit_text("second"), Ok(vec![]));
    }

    #[test]
    fn submit_after_reply_chosen_is_ignored() {
        let mut composer = mount(1);
        composer.select_reply(0);

        assert_eq!(composer.submit_text("typed"), Ok(vec![]));
        assert!(!composer.ui().is_submit_loading);
    }

    #[test]
    fn typing_hides_replies_and_enables_submit() {
        let mut composer = mount(2);

        composer.set_input("h");
        assert!(composer.can_submit());
        assert_eq!(composer.quick_reply_axis(), QuickReplyAxis::Hidden);
    }

    #[test]
    fn typing_after_error_keeps_replies_visible() {
        let mut composer = mount(2);
        composer.submit_text("").unwrap_err();

        let actions = composer.set_input("a");
        assert!(composer.can_submit());
        assert_eq!(composer.quick_reply_axis(), QuickReplyAxis::Visible);
        assert_eq!(composer.ui().input_error, None);
        assert_eq!(actions, vec![AppAction::SetResetVisible(false)]);
    }

    #[test]
    fn clearing_input_raises_error() {
        let mut composer = mount(1);
        composer.set_input("abc");

        let actions = composer.set_input("");
        assert!(composer.ui().submit_disabled);
        assert_eq!(composer.ui().input_error, Some(ValidationError::Empty));
        assert!(actions.contains(&AppAction::SetResetVisible(true)));
    }

    #[test]
    fn typing_while_reply_chosen_keeps_submit_disabled() {
        let mut composer = mount(2);
        composer.select_reply(0);

        composer.set_input("text");
        assert!(composer.ui().submit_disabled);
    }

    #[test]
    fn delivery_ack_reveals_in_order() {
        let mut composer = mount(2);
        composer.set_input("x");

        let actions = composer.on_delivery_ack();
        assert_eq!(composer.quick_reply_axis(), QuickReplyAxis::Visible);

        let [AppAction::Reveal(sequence)] = &actions[..] else {
            unreachable!("expected a single reveal, got {actions:?}");
        };
        let targets: Vec<_> = sequence.steps().iter().map(|s| s.target).collect();
        assert_eq!(targets, vec![
            RevealTarget::QuickReply(0),
            RevealTarget::QuickReply(1),
            RevealTarget::InputRow
        ]);
    }

    #[test]
    fn typing_while_loading_cannot_submit() {
        let mut composer = mount(0);
        composer.set_input("first");
        composer.submit_current().unwrap();

        composer.set_input("second");
        assert!(composer.ui().is_submit_loading);
        assert!(!composer.can_submit());
        assert_eq!(composer.submit_current(), Ok(vec![]));
    }

    #[test]
    fn delivery_ack_without_replies_stays_hidden() {
        let mut composer = mount(0);
        composer.on_delivery_ack();

        assert_eq!(composer.quick_reply_axis(), QuickReplyAxis::Hidden);
    }

    #[test]
    fn submission_failure_reenables_replies() {
        let mut composer = mount(3);
        composer.select_reply(2);

        composer.on_submission_failed();
        assert!(!composer.ui().reply_disabled);
        assert_eq!(composer.ui().reply_selected_index, None);
        assert!(composer.ui().submit_disabled);

        assert!(!composer.select_reply(0).is_empty());
    }

    #[test]
    fn submission_failure_restores_submit_with_text() {
        let mut composer = mount(0);
        composer.set_input("hello");
        composer.submit_current().unwrap();

        composer.on_submission_failed();
        assert!(!composer.ui().is_submit_loading);
        assert!(composer.can_submit());
    }

    #[test]
    fn placeholder_falls_back_to_default() {
        let mut chat = chat(0);
        chat.input_placeholder.clear();
        let composer = Composer::mount(&chat, ComposerConfig::default());

        assert_eq!(composer.placeholder(), ComposerConfig::default().default_placeholder);
        assert_eq!(mount(0).placeholder(), "How are you?");
    }

    #[test]
    fn sync_drops_stale_selection() {
        let mut composer = mount(3);
        composer.select_reply(2);

        composer.sync(&chat(1));
        assert_eq!(composer.ui().reply_selected_index, None);
        assert!(composer.ui().reply_disabled);
    }
}
