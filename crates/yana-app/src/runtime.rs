//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: state machine
//! - [`Persistence`]: the four persisted slices
//! - [`Driver`]: Platform-specific I/O
//!
//! Boot runs the restore protocol and arms the boot-complete signal. The loop
//! then selects over driver events, pushed notifications, and that signal.

use tracing::{debug, error, info};
use yana_core::Environment;
use yana_store::{Persistence, StorageKey};

use crate::{
    App, AppAction, AppConfig, AppEvent, DeferredSignal, Driver, NotificationInbox,
    PersistedBlobs, RestoreController, RestoreOutcome, RestoreReport,
};

/// Generic runtime that orchestrates App, persistence, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment for timers
/// - `P`: Persistence collaborator
pub struct Runtime<D, E, P>
where
    D: Driver,
    E: Environment,
    P: Persistence,
{
    driver: D,
    env: E,
    persistence: P,
    app: App,
    restore: RestoreController,
    boot_signal: DeferredSignal,
    notifications: NotificationInbox,
}

impl<D, E, P> Runtime<D, E, P>
where
    D: Driver,
    E: Environment,
    P: Persistence,
{
    /// Create a new runtime. Nothing is read until [`Self::boot`].
    pub fn new(driver: D, env: E, persistence: P, config: AppConfig) -> Self {
        Self {
            driver,
            env,
            persistence,
            app: App::new(config.composer),
            restore: RestoreController::new(config.restore),
            boot_signal: DeferredSignal::idle(),
            notifications: NotificationInbox::closed(),
        }
    }

    /// Receive push notifications from this inbox.
    #[must_use]
    pub fn with_notifications(mut self, inbox: NotificationInbox) -> Self {
        self.notifications = inbox;
        self
    }

    /// Run the restore protocol and arm the boot-complete signal.
    ///
    /// A failed read counts as no session. The signal is armed before any
    /// restore action runs, so it fires even when the driver fails below.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails while executing restore actions.
    pub async fn boot(&mut self) -> Result<RestoreOutcome, D::Error> {
        let report = match self.persistence.multi_get(&StorageKey::ALL) {
            Ok(entries) => self.restore.restore(&PersistedBlobs::from_entries(entries)),
            Err(e) => {
                error!(error = %e, "failed to read persisted state");
                RestoreReport::storage_failure(e.to_string())
            },
        };

        let outcome = report.outcome;
        info!(?outcome, fault = ?report.fault, "restore finished");

        self.boot_signal = DeferredSignal::schedule(&self.env, self.restore.config().boot_delay);

        let actions = self.app.apply_restore(report);
        self.process_actions(actions).await?;
        Ok(outcome)
    }

    /// Run the main event loop.
    ///
    /// Boots, then processes events until the App asks to quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        self.boot().await?;

        loop {
            if self.step().await? {
                break;
            }
        }

        self.teardown();
        Ok(())
    }

    /// Wait for and process the next event from any source.
    ///
    /// Driver events take priority over notifications, which take priority
    /// over the boot signal. Returns `true` if the application should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        let event = tokio::select! {
            biased;
            event = self.driver.poll_event() => event?,
            notification = self.notifications.recv() => {
                Some(AppEvent::NotificationReceived(notification))
            },
            () = self.boot_signal.wait() => Some(AppEvent::BootCompleted),
        };

        let Some(event) = event else {
            return Ok(false);
        };

        let actions = self.app.handle(event);
        self.process_actions(actions).await
    }

    /// Cancel the boot signal, detach the lifecycle bridge, and stop the driver.
    pub fn teardown(&mut self) {
        self.boot_signal.cancel();
        self.app.teardown();
        self.driver.stop();
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::SubmitResponse(payload) => {
                    self.driver.submit_response(payload).await?;
                },
                AppAction::DismissKeyboard => self.driver.dismiss_keyboard(),
                AppAction::Reveal(sequence) => self.driver.reveal(&sequence),
                AppAction::SetResetVisible(visible) => self.driver.set_reset_visible(visible),
                AppAction::RequestConversationRefresh => {
                    self.driver.request_conversation_refresh().await?;
                },
                AppAction::ClearPersistence => {
                    if let Err(e) = self.persistence.clear() {
                        error!(error = %e, "failed to clear persisted state");
                    }
                },
                AppAction::Publish(key) => self.driver.store_published(key, &self.app),
                AppAction::Persist(key) => self.persist(key),
                AppAction::HideSplash => self.driver.hide_splash(),
            }
        }
        Ok(false)
    }

    fn persist(&self, key: StorageKey) {
        let value = match self.app.encode(key) {
            Ok(value) => value,
            Err(e) => {
                error!(%key, error = %e, "failed to encode slice");
                return;
            },
        };

        match self.persistence.set(key, &value) {
            Ok(()) => debug!(%key, bytes = value.len(), "slice persisted"),
            Err(e) => error!(%key, error = %e, "failed to persist slice"),
        }
    }

    /// Get a reference to the App.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Get a reference to the persistence collaborator.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// True while the boot-complete signal is armed.
    pub fn boot_pending(&self) -> bool {
        self.boot_signal.is_pending()
    }
}
