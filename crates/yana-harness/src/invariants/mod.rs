//! Invariant checking for simulation testing.
//!
//! Invariants are properties that must always hold during execution. Unlike
//! example-based tests that check specific scenarios, invariants verify
//! behavioral properties across all possible event sequences.
//!
//! # Architecture
//!
//! The invariant system extracts observable state from the App into a
//! [`SystemSnapshot`], then runs registered [`Invariant`] checks against it.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = SystemSnapshot::from_app(&app);
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    EdgeFlagsConsumed, ReplyLockDisablesSubmit, RouteFollowsToken, SelectionInRange,
    SelectionLocksReplies, SubmitNeedsText, VisibleRepliesExist,
};
pub use snapshot::{ComposerSnapshot, SystemSnapshot};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against app state.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against the current state.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &SystemSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Use [`InvariantRegistry::standard()`] for the composer and store
/// invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard invariants.
    ///
    /// Includes:
    /// - [`SelectionLocksReplies`]: a chosen reply disables the row
    /// - [`SelectionInRange`]: the chosen reply exists
    /// - [`ReplyLockDisablesSubmit`]: no free text while a reply is chosen
    /// - [`SubmitNeedsText`]: enabled submit has input behind it
    /// - [`VisibleRepliesExist`]: a shown row is never empty
    /// - [`EdgeFlagsConsumed`]: messaging edge flags are reset after use
    /// - [`RouteFollowsToken`]: navigation matches the session token
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SelectionLocksReplies);
        registry.add(SelectionInRange);
        registry.add(ReplyLockDisablesSubmit);
        registry.add(SubmitNeedsText);
        registry.add(VisibleRepliesExist);
        registry.add(EdgeFlagsConsumed);
        registry.add(RouteFollowsToken);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &SystemSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation found.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &SystemSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
