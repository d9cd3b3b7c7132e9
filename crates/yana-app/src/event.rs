//! Application input events.
//!
//! This module defines [`AppEvent`], the inputs that drive the [`crate::App`]
//! state machine.
//!
//! Events originate from three sources:
//! - User interactions on the chat screen.
//! - Store updates published by the messaging and auth collaborators.
//! - Platform notifications (foreground/background, push, boot timer).

use yana_core::{ChatState, SessionState};

use crate::{AppStatus, PushNotification};

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Chat screen mounted; a fresh composer is created.
    ChatScreenMounted,

    /// Chat screen unmounted; the composer is destroyed.
    ChatScreenUnmounted,

    /// Free-text input changed.
    InputChanged(String),

    /// Quick reply at this index pressed.
    ReplyPressed(usize),

    /// Send button pressed with the current input.
    SubmitPressed,

    /// Messaging collaborator published a new chat slice.
    ChatUpdated(ChatState),

    /// Auth collaborator published a new session (sign-in, sign-out).
    SessionUpdated(SessionState),

    /// Platform foreground/background status changed.
    AppStatusChanged(AppStatus),

    /// Push notification delivered.
    NotificationReceived(PushNotification),

    /// Boot delay elapsed.
    BootCompleted,

    /// User asked to quit.
    Quit,
}
