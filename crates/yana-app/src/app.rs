//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the four
//! published stores (session, chat, settings, ui), the chat screen's
//! [`Composer`] while it is mounted, and the [`LifecycleBridge`].
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Publishes restored state in a fixed order, then asks for a refresh.
//! - Turns messaging edge flags into composer transitions and consumes them.
//! - Persists slices that change after boot.

use serde_json::Error as JsonError;
use tracing::{debug, info};
use yana_core::{ChatState, Route, SessionState, SettingsState, UiState};
use yana_store::StorageKey;

use crate::{
    AppAction, AppEvent, Composer, ComposerConfig, LifecycleBridge, RestoreOutcome, RestoreReport,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Configuration handed to every mounted composer.
    composer_config: ComposerConfig,
    /// Published session store.
    session: SessionState,
    /// Published chat store. Edge flags are always consumed (false) here.
    chat: ChatState,
    /// Published settings store.
    settings: SettingsState,
    /// Published ui store.
    ui: UiState,
    /// Composer of the mounted chat screen. `None` while unmounted.
    composer: Option<Composer>,
    /// Foreground/background edge detector.
    lifecycle: LifecycleBridge,
    /// Boot-complete signal received.
    booted: bool,
}

impl App {
    /// Create an App with empty stores.
    pub fn new(composer_config: ComposerConfig) -> Self {
        Self {
            composer_config,
            session: SessionState::default(),
            chat: ChatState::default(),
            settings: SettingsState::default(),
            ui: UiState::default(),
            composer: None,
            lifecycle: LifecycleBridge::default(),
            booted: false,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::ChatScreenMounted => {
                self.composer = Some(Composer::mount(&self.chat, self.composer_config.clone()));
                vec![AppAction::Render]
            },
            AppEvent::ChatScreenUnmounted => {
                self.composer = None;
                vec![AppAction::Render]
            },
            AppEvent::InputChanged(text) => self.with_composer(|c| c.set_input(text)),
            AppEvent::ReplyPressed(index) => self.with_composer(|c| c.select_reply(index)),
            AppEvent::SubmitPressed => self.with_composer(|c| {
                c.submit_current().unwrap_or_else(|rejected| {
                    debug!(error = %rejected.error, "submission rejected");
                    rejected.actions
                })
            }),
            AppEvent::ChatUpdated(chat) => self.apply_chat(chat),
            AppEvent::SessionUpdated(session) => {
                if session.token != self.session.token {
                    info!(authenticated = session.is_authenticated(), "session changed");
                }
                self.session = session;
                vec![
                    AppAction::Publish(StorageKey::Session),
                    AppAction::Persist(StorageKey::Session),
                    AppAction::Render,
                ]
            },
            AppEvent::AppStatusChanged(status) => {
                if self.lifecycle.transition(status, &self.session.token) {
                    vec![AppAction::RequestConversationRefresh]
                } else {
                    vec![]
                }
            },
            AppEvent::NotificationReceived(notification) => {
                if self.session.is_authenticated() {
                    debug!(id = %notification.id, "notification, refreshing conversation");
                    vec![AppAction::RequestConversationRefresh]
                } else {
                    debug!(id = %notification.id, "notification ignored, no session");
                    vec![]
                }
            },
            AppEvent::BootCompleted => {
                self.booted = true;
                vec![AppAction::HideSplash, AppAction::Render]
            },
            AppEvent::Quit => vec![AppAction::Quit],
        }
    }

    /// Publish the outcome of the restore protocol.
    ///
    /// Restored slices are published chat, settings, ui, then session, and a
    /// conversation refresh follows. An incompatible session wipes
    /// persistence. Nothing is published otherwise.
    pub fn apply_restore(&mut self, report: RestoreReport) -> Vec<AppAction> {
        match report.outcome {
            RestoreOutcome::NoSession => return vec![AppAction::Render],
            RestoreOutcome::Incompatible => {
                return vec![AppAction::ClearPersistence, AppAction::Render];
            },
            RestoreOutcome::Restored => {},
        }

        let Some(state) = report.state else {
            return vec![AppAction::Render];
        };

        let mut actions = Vec::with_capacity(6);

        if let Some(mut chat) = state.chat {
            chat.user_response_failed = false;
            chat.yana_messages_delivered = false;
            self.chat = chat;
            if self.composer.is_some() {
                self.composer = Some(Composer::mount(&self.chat, self.composer_config.clone()));
            }
            actions.push(AppAction::Publish(StorageKey::Chat));
        }
        if let Some(settings) = state.settings {
            self.settings = settings;
            actions.push(AppAction::Publish(StorageKey::Settings));
        }
        if let Some(ui) = state.ui {
            self.ui = ui;
            actions.push(AppAction::Publish(StorageKey::Ui));
        }
        self.session = state.session;
        actions.push(AppAction::Publish(StorageKey::Session));

        actions.push(AppAction::RequestConversationRefresh);
        actions.push(AppAction::Render);
        actions
    }

    /// Stop reacting to platform events. Called on runtime teardown.
    pub fn teardown(&mut self) {
        self.lifecycle.detach();
        self.composer = None;
    }

    /// Serialize one store slice for persistence.
    pub fn encode(&self, key: StorageKey) -> Result<String, JsonError> {
        match key {
            StorageKey::Chat => serde_json::to_string(&self.chat),
            StorageKey::Session => serde_json::to_string(&self.session),
            StorageKey::Settings => serde_json::to_string(&self.settings),
            StorageKey::Ui => serde_json::to_string(&self.ui),
        }
    }

    fn apply_chat(&mut self, next: ChatState) -> Vec<AppAction> {
        let delivered = next.yana_messages_delivered && !self.chat.yana_messages_delivered;
        let failed = next.user_response_failed && !self.chat.user_response_failed;
        let new_turn = next.next_key != self.chat.next_key;

        self.chat = next;
        self.chat.user_response_failed = false;
        self.chat.yana_messages_delivered = false;

        let mut actions = vec![AppAction::Publish(StorageKey::Chat)];

        if let Some(composer) = self.composer.as_mut() {
            if new_turn {
                debug!(next_key = %self.chat.next_key, "new turn, remounting composer");
                *composer = Composer::mount(&self.chat, self.composer_config.clone());
            } else {
                composer.sync(&self.chat);
            }
            if failed {
                actions.extend(composer.on_submission_failed());
            }
            if delivered {
                actions.extend(composer.on_delivery_ack());
            }
        }

        actions.push(AppAction::Persist(StorageKey::Chat));
        actions.push(AppAction::Render);
        actions
    }

    fn with_composer(&mut self, f: impl FnOnce(&mut Composer) -> Vec<AppAction>) -> Vec<AppAction> {
        let Some(composer) = self.composer.as_mut() else {
            debug!("chat screen not mounted, input ignored");
            return vec![];
        };

        let mut actions = f(composer);
        actions.push(AppAction::Render);
        actions
    }

    /// Published session.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Published chat slice.
    pub fn chat(&self) -> &ChatState {
        &self.chat
    }

    /// Published settings slice.
    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    /// Published ui slice.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Composer of the mounted chat screen.
    pub fn composer(&self) -> Option<&Composer> {
        self.composer.as_ref()
    }

    /// Lifecycle bridge.
    pub fn lifecycle(&self) -> &LifecycleBridge {
        &self.lifecycle
    }

    /// Root navigation branch for the current session.
    pub fn route(&self) -> Route {
        Route::for_token(&self.session.token)
    }

    /// Swiping between the main tabs is allowed once onboarding is done.
    pub fn tabs_swipe_enabled(&self) -> bool {
        self.session.is_onboarding_done
    }

    /// True once the boot-complete signal was received.
    pub fn is_booted(&self) -> bool {
        self.booted
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(ComposerConfig::default())
    }
}
