//! Production Environment implementation on tokio time.
//!
//! `SystemEnv` reads `tokio::time::Instant` rather than the std clock so the
//! same code runs unchanged under a paused test runtime, where time only moves
//! when every task is idle.

use std::time::Duration;

use yana_core::Environment;

/// Production environment backed by the tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = tokio::time::Instant;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
