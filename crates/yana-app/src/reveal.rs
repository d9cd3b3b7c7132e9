//! Quick-reply reveal sequencing.
//!
//! Timing curves belong to the presentation layer; this only fixes the order
//! and the stagger offsets.

use std::time::Duration;

/// What a reveal step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTarget {
    /// Quick reply at this index.
    QuickReply(usize),
    /// Free-text input row.
    InputRow,
}

/// One staggered reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep {
    /// Element revealed.
    pub target: RevealTarget,
    /// Offset from the start of the sequence.
    pub delay: Duration,
    /// Reveal length.
    pub duration: Duration,
}

/// Ordered reveal: every quick reply in array order, then the input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSequence {
    steps: Vec<RevealStep>,
}

impl RevealSequence {
    /// Build the sequence for `reply_count` quick replies.
    pub fn staggered(reply_count: usize, stagger: Duration, duration: Duration) -> Self {
        let targets =
            (0..reply_count).map(RevealTarget::QuickReply).chain([RevealTarget::InputRow]);

        let steps = targets
            .enumerate()
            .map(|(position, target)| {
                let position = u32::try_from(position).unwrap_or(u32::MAX);
                RevealStep { target, delay: stagger.saturating_mul(position), duration }
            })
            .collect();

        Self { steps }
    }

    /// Steps in reveal order.
    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    /// Number of steps (always at least one: the input row).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; the input row is always revealed.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time until the last step finishes.
    pub fn total_duration(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |step| step.delay + step.duration)
    }
}
