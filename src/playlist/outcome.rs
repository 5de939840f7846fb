//! Outcome classification.
//!
//! Classification is judged from observed counts, not from HTTP statuses:
//! an acknowledged write that changed nothing is a no-op, and a failed
//! call whose effect still landed counts as delivered.

use serde::Serialize;

use crate::playlist::executor::MutationAttempt;
use crate::playlist::request::MutationOp;
use crate::playlist::strategy::MutationStrategy;
use crate::playlist::verifier::CountSource;

/// What a mutation verifiably did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// The count moved by at least the attempted amount.
    FullSuccess,
    /// The count moved, but by less than attempted.
    PartialSuccess,
    /// Nothing moved and every call was acknowledged.
    NoopSuccess,
    /// Nothing moved and at least one call failed.
    HardFailure,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullSuccess => "FULL_SUCCESS",
            Self::PartialSuccess => "PARTIAL_SUCCESS",
            Self::NoopSuccess => "NOOP_SUCCESS",
            Self::HardFailure => "HARD_FAILURE",
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::HardFailure)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much the reported count is to be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The count was observed from the server.
    Normal,
    /// The count is a projection; no poll ever succeeded.
    Degraded,
}

/// Membership change oriented along the requested direction: positive
/// means the playlist moved the way the caller asked.
pub fn oriented_delta(op: MutationOp, before: u32, after: u32) -> i64 {
    let before = i64::from(before);
    let after = i64::from(after);
    match op {
        MutationOp::Add => after - before,
        MutationOp::Remove => before - after,
    }
}

/// Optimistic post-write count for when verification came up empty:
/// assume every acknowledged call did what it claimed.
pub fn optimistic_estimate(op: MutationOp, before: u32, acknowledged_effect: u32) -> u32 {
    match op {
        MutationOp::Add => before.saturating_add(acknowledged_effect),
        MutationOp::Remove => before.saturating_sub(acknowledged_effect),
    }
}

/// Maps delta and call evidence to a class. Total: every input lands in
/// exactly one arm, including negative deltas from concurrent writers.
pub fn classify(attempted: usize, actual_delta: i64, all_calls_acknowledged: bool) -> Classification {
    let attempted = attempted as i64;
    if attempted > 0 && actual_delta >= attempted {
        Classification::FullSuccess
    } else if actual_delta > 0 {
        Classification::PartialSuccess
    } else if all_calls_acknowledged {
        Classification::NoopSuccess
    } else {
        Classification::HardFailure
    }
}

/// The engine's complete answer for one mutation.
#[derive(Debug, Clone, Serialize)]
pub struct MutationResult {
    pub playlist_id: String,
    pub playlist_title: String,
    pub operation: MutationOp,
    pub strategy: MutationStrategy,
    pub attempted_count: usize,
    pub before_count: u32,
    pub after_count: u32,
    pub actual_delta: i64,
    pub classification: Classification,
    pub confidence: Confidence,
    pub count_source: CountSource,
    pub polls_used: u32,
    pub baseline_confirmed: bool,
    pub attempts: Vec<MutationAttempt>,
}
