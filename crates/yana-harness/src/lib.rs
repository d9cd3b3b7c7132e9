//! Deterministic simulation harness for the Yana client runtime.
//!
//! [`SimDriver`] implements the runtime's Driver trait with scripted input and
//! recorded side effects, so tests drive the production [`yana_app::Runtime`]
//! under tokio's paused clock.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the composer
//! and store invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;

pub use invariants::{
    ComposerSnapshot, EdgeFlagsConsumed, Invariant, InvariantRegistry, InvariantResult,
    ReplyLockDisablesSubmit, RouteFollowsToken, SelectionInRange, SelectionLocksReplies,
    SubmitNeedsText, SystemSnapshot, Violation, VisibleRepliesExist,
};
pub use sim_driver::{SimDriver, SimDriverError};
