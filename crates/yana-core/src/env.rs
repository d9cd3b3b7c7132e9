//! Environment abstraction for deterministic testing.
//!
//! Decouples state-machine timing from the system clock. Production code runs on
//! tokio time; tests run the same code on paused (virtual) time.

use std::time::Duration;

/// Abstract environment providing time and async sleeping.
///
/// # Invariants
///
/// - `now()` never goes backwards within one execution context.
/// - `sleep()` completes no earlier than `duration` after it is first polled.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The instant type used by this environment.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// Only driver code awaits this. The state machines never sleep; they emit
    /// actions that the runtime schedules.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}
