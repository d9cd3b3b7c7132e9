//! Cancelable deferred signal.
//!
//! Used for the boot-complete signal: it fires once, after a delay, unless it
//! is cancelled first. Cancelling (or dropping) aborts the timer task, so a
//! torn-down runtime never observes a late fire.

use std::{future::pending, time::Duration};

use tokio::{sync::oneshot, task::JoinHandle};
use yana_core::Environment;

#[derive(Debug)]
enum SignalState {
    Idle,
    Pending { rx: oneshot::Receiver<()>, task: JoinHandle<()> },
    Fired,
    Cancelled,
}

/// One-shot signal that fires after a delay.
#[derive(Debug)]
pub struct DeferredSignal {
    state: SignalState,
}

impl DeferredSignal {
    /// A signal that was never scheduled. [`Self::wait`] never resolves.
    pub fn idle() -> Self {
        Self { state: SignalState::Idle }
    }

    /// Start the timer. Must be called from within a tokio runtime.
    pub fn schedule<E: Environment>(env: &E, delay: Duration) -> Self {
        let (tx, rx) = oneshot::channel();
        let env = env.clone();
        let task = tokio::spawn(async move {
            env.sleep(delay).await;
            let _ = tx.send(());
        });

        Self { state: SignalState::Pending { rx, task } }
    }

    /// Wait for the signal.
    ///
    /// Resolves once, when the delay elapses. Never resolves if the signal is
    /// idle, cancelled, or already fired. Safe to drop mid-wait and call
    /// again.
    pub async fn wait(&mut self) {
        if let SignalState::Pending { rx, .. } = &mut self.state {
            if rx.await.is_ok() {
                self.state = SignalState::Fired;
                return;
            }
            self.state = SignalState::Cancelled;
        }
        pending::<()>().await;
    }

    /// Cancel the signal if still pending.
    pub fn cancel(&mut self) {
        if let SignalState::Pending { task, .. } = &self.state {
            task.abort();
        }
        if !self.has_fired() {
            self.state = SignalState::Cancelled;
        }
    }

    /// True while the timer is running.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SignalState::Pending { .. })
    }

    /// True once the signal fired.
    pub fn has_fired(&self) -> bool {
        matches!(self.state, SignalState::Fired)
    }
}

impl Drop for DeferredSignal {
    fn drop(&mut self) {
        if let SignalState::Pending { task, .. } = &self.state {
            task.abort();
        }
    }
}
