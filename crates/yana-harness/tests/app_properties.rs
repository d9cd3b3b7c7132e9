//! Property-based tests for the App and Composer state machines.
//!
//! Tests verify that invariants hold under arbitrary event sequences.
//! This ensures behavioral correctness across all possible execution paths.

use proptest::prelude::*;
use yana_app::{App, AppAction, AppEvent, AppStatus, LifecycleBridge, QuickReplyAxis};
use yana_core::{ChatState, QuickReply, SessionState};
use yana_harness::{InvariantRegistry, SystemSnapshot};

fn chat(next_key: &str, replies: usize, failed: bool, delivered: bool) -> ChatState {
    ChatState {
        next_key: next_key.to_string(),
        quick_replies: (0..replies).map(|i| QuickReply::new(format!("r{i}"), format!("n{i}"))).collect(),
        user_response_failed: failed,
        yana_messages_delivered: delivered,
        ..ChatState::default()
    }
}

fn input_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("\t".to_string()),
        "[a-z ]{1,12}",
    ]
}

fn status_strategy() -> impl Strategy<Value = AppStatus> {
    prop_oneof![
        Just(AppStatus::Active),
        Just(AppStatus::Background),
        Just(AppStatus::Inactive),
        Just(AppStatus::Unknown),
    ]
}

/// Generate random app events.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        1 => Just(AppEvent::Tick),
        2 => Just(AppEvent::ChatScreenMounted),
        1 => Just(AppEvent::ChatScreenUnmounted),
        4 => input_strategy().prop_map(AppEvent::InputChanged),
        4 => (0usize..5).prop_map(AppEvent::ReplyPressed),
        3 => Just(AppEvent::SubmitPressed),
        3 => (prop_oneof![Just("a"), Just("b")], 0usize..4, any::<bool>(), any::<bool>())
            .prop_map(|(key, n, failed, delivered)| {
                AppEvent::ChatUpdated(chat(key, n, failed, delivered))
            }),
        1 => prop_oneof![Just(""), Just("tok")].prop_map(|token| {
            AppEvent::SessionUpdated(SessionState { token: token.into(), ..SessionState::default() })
        }),
        2 => status_strategy().prop_map(AppEvent::AppStatusChanged),
        1 => Just(AppEvent::BootCompleted),
    ]
}

fn submissions(actions: &[AppAction]) -> usize {
    actions.iter().filter(|a| matches!(a, AppAction::SubmitResponse(_))).count()
}

proptest! {
    #[test]
    fn prop_app_invariants_hold(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut app = App::default();
        let invariants = InvariantRegistry::standard();

        for event in events {
            let _ = app.handle(event.clone());
            let snapshot = SystemSnapshot::from_app(&app);
            prop_assert!(
                invariants.check_all(&snapshot).is_ok(),
                "after {:?}: {:?}", event, invariants.check_all(&snapshot)
            );
        }
    }

    #[test]
    fn prop_mount_visibility(replies in 0usize..8) {
        let mut app = App::default();
        app.handle(AppEvent::ChatUpdated(chat("a", replies, false, false)));
        app.handle(AppEvent::ChatScreenMounted);

        let axis = app.composer().unwrap().quick_reply_axis();
        prop_assert_eq!(axis == QuickReplyAxis::Visible, replies > 0);
    }

    #[test]
    fn prop_one_submission_per_choice(
        replies in 1usize..5,
        presses in prop::collection::vec(0usize..5, 1..10),
    ) {
        let mut app = App::default();
        app.handle(AppEvent::ChatUpdated(chat("a", replies, false, false)));
        app.handle(AppEvent::ChatScreenMounted);

        let sent: usize = presses
            .into_iter()
            .map(|i| submissions(&app.handle(AppEvent::ReplyPressed(i))))
            .sum();
        prop_assert!(sent <= 1);
    }

    #[test]
    fn prop_blank_never_submits(input in "[ \t\n]{0,8}") {
        let mut app = App::default();
        app.handle(AppEvent::ChatUpdated(chat("a", 2, false, false)));
        app.handle(AppEvent::ChatScreenMounted);
        app.handle(AppEvent::InputChanged(input));

        prop_assert_eq!(submissions(&app.handle(AppEvent::SubmitPressed)), 0);
        let composer = app.composer().unwrap();
        prop_assert_eq!(composer.quick_reply_axis(), QuickReplyAxis::Visible);
        prop_assert!(composer.ui().input_error.is_some());
    }

    #[test]
    fn prop_failure_restores_submit_with_text(
        text in "[a-z]{1,10}",
        pick in prop::option::of(0usize..3),
    ) {
        let mut app = App::default();
        app.handle(AppEvent::ChatUpdated(chat("a", 3, false, false)));
        app.handle(AppEvent::ChatScreenMounted);
        app.handle(AppEvent::InputChanged(text));
        match pick {
            Some(index) => { app.handle(AppEvent::ReplyPressed(index)); },
            None => { app.handle(AppEvent::SubmitPressed); },
        }

        app.handle(AppEvent::ChatUpdated(chat("a", 3, true, false)));

        let composer = app.composer().unwrap();
        prop_assert!(!composer.ui().submit_disabled);
        prop_assert!(composer.can_submit());
    }

    #[test]
    fn prop_lifecycle_fires_only_on_resume_with_token(
        steps in prop::collection::vec((status_strategy(), prop_oneof![Just(""), Just("abc")]), 1..20),
    ) {
        let mut bridge = LifecycleBridge::default();
        let mut previous = AppStatus::Active;

        for (status, token) in steps {
            let fired = bridge.transition(status, token);
            let expected =
                previous == AppStatus::Background && status == AppStatus::Active && !token.is_empty();
            prop_assert_eq!(fired, expected);
            previous = status;
        }
    }
}
