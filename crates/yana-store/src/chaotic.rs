//! Fault-injecting store wrapper
//!
//! Wraps another store and randomly fails operations so restore and
//! persist-back paths can be exercised against storage failures.

#![allow(clippy::disallowed_types, reason = "Locking simple RNG state")]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use super::{Entries, Persistence, StorageError, StorageKey};

/// Store wrapper that randomly injects failures
///
/// Delegates to an underlying store but fails operations based on a
/// configured failure rate. A failed operation never reaches the inner store.
#[derive(Clone)]
pub struct ChaoticStore<P: Persistence> {
    inner: P,
    /// Failure rate (0.0 = never fail, 1.0 = always fail)
    failure_rate: f64,
    /// RNG state for deterministic chaos
    rng: Arc<Mutex<ChaoticRng>>,
    operation_count: Arc<AtomicUsize>,
    injected_count: Arc<AtomicUsize>,
}

/// Linear congruential generator, so chaos runs are reproducible per seed.
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0.0, 1.0)
    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> f64 {
        // LCG constants from Numerical Recipes
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }
}

impl<P: Persistence> ChaoticStore<P> {
    /// Create a chaotic wrapper with a fixed default seed.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn new(inner: P, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, 0x1234_5678_9ABC_DEF0)
    }

    /// Create with explicit seed for reproducible chaos
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn with_seed(inner: P, failure_rate: f64, seed: u64) -> Self {
        assert!(
            (0.0..=1.0).contains(&failure_rate),
            "failure_rate must be between 0.0 and 1.0, got {failure_rate}"
        );

        Self {
            inner,
            failure_rate,
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
            operation_count: Arc::new(AtomicUsize::new(0)),
            injected_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Underlying store (for checking state after chaos).
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Total number of operations attempted.
    pub fn operation_count(&self) -> usize {
        self.operation_count.load(Ordering::Relaxed)
    }

    /// Number of operations that were failed on purpose.
    pub fn injected_count(&self) -> usize {
        self.injected_count.load(Ordering::Relaxed)
    }

    fn roll(&self, operation: &'static str) -> Result<(), StorageError> {
        self.operation_count.fetch_add(1, Ordering::Relaxed);

        #[allow(clippy::expect_used)]
        let fail = self.rng.lock().expect("ChaoticRng mutex poisoned").next() < self.failure_rate;
        if fail {
            self.injected_count.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(operation, "injecting storage failure");
            return Err(StorageError::Injected(operation));
        }
        Ok(())
    }
}

impl<P: Persistence> Persistence for ChaoticStore<P> {
    fn multi_get(&self, keys: &[StorageKey]) -> Result<Entries, StorageError> {
        self.roll("multi_get")?;
        self.inner.multi_get(keys)
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.roll("set")?;
        self.inner.set(key, value)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.roll("clear")?;
        self.inner.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn zero_rate_never_fails() {
        let store = ChaoticStore::new(MemoryStore::new(), 0.0);
        for _ in 0..100 {
            store.set(StorageKey::Chat, "{}").unwrap();
        }
        assert_eq!(store.operation_count(), 100);
        assert_eq!(store.injected_count(), 0);
    }

    #[test]
    fn full_rate_always_fails_without_touching_inner() {
        let store = ChaoticStore::new(MemoryStore::new(), 1.0);

        assert_eq!(store.set(StorageKey::Chat, "{}"), Err(StorageError::Injected("set")));
        assert_eq!(store.clear(), Err(StorageError::Injected("clear")));
        assert!(store.inner().is_empty());
    }

    #[test]
    fn same_seed_same_failures() {
        let run = |seed| {
            let store = ChaoticStore::with_seed(MemoryStore::new(), 0.5, seed);
            (0..32).map(|_| store.clear().is_err()).collect::<Vec<_>>()
        };
        assert_eq!(run(7), run(7));
    }
}
