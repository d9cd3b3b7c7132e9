//! Push notification channel.
//!
//! Latest value wins: a burst of notifications that arrives before the
//! runtime gets to them collapses into one refresh.

use std::future::pending;

use tokio::sync::watch;

/// A delivered push notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushNotification {
    /// Platform notification identifier.
    pub id: String,
    /// Title, if any.
    pub title: Option<String>,
    /// Body text, if any.
    pub body: Option<String>,
}

/// Create a connected sender/inbox pair.
pub fn channel() -> (NotificationSender, NotificationInbox) {
    let (tx, rx) = watch::channel(None);
    (NotificationSender { tx }, NotificationInbox { rx: Some(rx) })
}

/// Publishing half, held by the platform push handler.
#[derive(Debug, Clone)]
pub struct NotificationSender {
    tx: watch::Sender<Option<PushNotification>>,
}

impl NotificationSender {
    /// Publish a notification, replacing any not yet received.
    pub fn publish(&self, notification: PushNotification) {
        self.tx.send_replace(Some(notification));
    }
}

/// Receiving half, held by the runtime.
#[derive(Debug)]
pub struct NotificationInbox {
    rx: Option<watch::Receiver<Option<PushNotification>>>,
}

impl NotificationInbox {
    /// An inbox that never yields.
    pub fn closed() -> Self {
        Self { rx: None }
    }

    /// Wait for the next notification.
    ///
    /// Never resolves once every sender is dropped.
    pub async fn recv(&mut self) -> PushNotification {
        loop {
            let Some(rx) = self.rx.as_mut() else {
                return pending().await;
            };

            if rx.changed().await.is_err() {
                self.rx = None;
                continue;
            }

            if let Some(notification) = rx.borrow_and_update().clone() {
                return notification;
            }
        }
    }

    /// Take an unseen notification without waiting.
    pub fn try_recv(&mut self) -> Option<PushNotification> {
        let rx = self.rx.as_mut()?;
        if rx.has_changed().unwrap_or(false) {
            rx.borrow_and_update().clone()
        } else {
            None
        }
    }
}
