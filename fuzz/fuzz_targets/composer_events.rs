//! Fuzz target for the conversation input state machine
//!
//! Drives App::handle with arbitrary event sequences and checks the standard
//! invariant registry after every event.
//!
//! # Invariants
//!
//! - handle NEVER panics
//! - A selected reply always locks the list and disables submit
//! - Submit is never enabled on blank input
//! - At most one submission per reply selection

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yana_app::{App, AppAction, AppEvent, AppStatus};
use yana_core::{ChatState, QuickReply};
use yana_harness::{InvariantRegistry, SystemSnapshot};

#[derive(Debug, Arbitrary)]
enum Op {
    Mount,
    Unmount,
    Type(String),
    Reply(u8),
    Submit,
    Delivered { next_key: String, replies: u8 },
    Failed,
    Status(u8),
}

fn chat(next_key: String, replies: u8) -> ChatState {
    ChatState {
        next_key,
        quick_replies: (0..replies % 6)
            .map(|i| QuickReply::new(format!("r{i}"), format!("k{i}")))
            .collect(),
        ..ChatState::default()
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let registry = InvariantRegistry::standard();
    let mut app = App::default();

    for op in ops {
        let event = match op {
            Op::Mount => AppEvent::ChatScreenMounted,
            Op::Unmount => AppEvent::ChatScreenUnmounted,
            Op::Type(text) => AppEvent::InputChanged(text),
            Op::Reply(index) => AppEvent::ReplyPressed(usize::from(index % 8)),
            Op::Submit => AppEvent::SubmitPressed,
            Op::Delivered { next_key, replies } => {
                let mut chat = chat(next_key, replies);
                chat.yana_messages_delivered = true;
                AppEvent::ChatUpdated(chat)
            },
            Op::Failed => {
                let mut chat = app.chat().clone();
                chat.user_response_failed = true;
                AppEvent::ChatUpdated(chat)
            },
            Op::Status(code) => AppEvent::AppStatusChanged(match code % 5 {
                0 => AppStatus::Active,
                1 => AppStatus::Background,
                2 => AppStatus::Inactive,
                3 => AppStatus::Unknown,
                _ => AppStatus::Extension,
            }),
        };

        let actions = app.handle(event);
        let submissions = actions.iter().filter(|a| matches!(a, AppAction::SubmitResponse(_))).count();
        assert!(submissions <= 1);

        if let Err(violations) = registry.check_all(&SystemSnapshot::from_app(&app)) {
            panic!("invariant violated: {violations:?}");
        }
    }
});
