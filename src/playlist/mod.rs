//! Playlist mutation engine.
//!
//! Plex acknowledges playlist writes before they are observable: a PUT can
//! return 200 while the item listing still shows the old membership for a
//! few hundred milliseconds. Everything in this module exists to turn that
//! acknowledgement into a verified outcome. A mutation runs through five
//! stages in order:
//!
//! 1. [`resolver`] captures server identity and the pre-write baseline.
//! 2. [`strategy`] picks how the write calls are issued.
//! 3. [`executor`] issues them, recording per-call evidence.
//! 4. [`verifier`] polls until the server reports a post-write count.
//! 5. [`outcome`] classifies what actually happened.
//!
//! Once the baseline is captured, nothing here returns an error: individual
//! call failures and unverifiable counts are recorded in the
//! [`outcome::MutationResult`] instead of aborting the run.

pub mod engine;
pub mod executor;
pub mod outcome;
pub mod request;
pub mod resolver;
pub mod store;
pub mod strategy;
pub mod verifier;

#[cfg(test)]
pub mod testing;

pub use engine::MutationEngine;
pub use outcome::{Classification, Confidence, MutationResult};
pub use request::{MutationOp, MutationRequest};
pub use resolver::ResolutionError;
pub use store::PlaylistStore;
pub use verifier::ReconcileConfig;
