//! The mutation engine: resolve, write, verify, classify.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use crate::playlist::executor::{self, ExecutionReport};
use crate::playlist::outcome::{self, Confidence, MutationResult};
use crate::playlist::request::{MutationOp, MutationRequest};
use crate::playlist::resolver::{self, ResolutionError};
use crate::playlist::store::PlaylistStore;
use crate::playlist::strategy::MutationStrategy;
use crate::playlist::verifier::{self, CountSource, ReconcileConfig, Verification};

/// Default pause between sequential write calls.
pub const DEFAULT_WRITE_PAUSE: Duration = Duration::from_millis(250);

/// Runs playlist mutations end to end.
///
/// Cheap to build per call; the only state is the shared store handle and
/// two timing knobs.
pub struct MutationEngine {
    store: Arc<dyn PlaylistStore>,
    reconcile: ReconcileConfig,
    write_pause: Duration,
}

impl MutationEngine {
    pub fn new(store: Arc<dyn PlaylistStore>) -> Self {
        Self {
            store,
            reconcile: ReconcileConfig::default(),
            write_pause: DEFAULT_WRITE_PAUSE,
        }
    }

    pub fn with_reconcile(mut self, reconcile: ReconcileConfig) -> Self {
        self.reconcile = reconcile;
        self
    }

    pub fn with_write_pause(mut self, pause: Duration) -> Self {
        self.write_pause = pause;
        self
    }

    /// Mutates playlist membership and reports what verifiably happened.
    ///
    /// The `Err` arm only fires when resolution fails, which is always
    /// before the first write call. Past that point call failures and
    /// unverifiable counts are folded into the result.
    #[instrument(
        skip(self, request),
        fields(playlist_id = %request.playlist_id, op = %request.op, items = request.item_keys.len())
    )]
    pub async fn mutate(&self, request: &MutationRequest) -> Result<MutationResult, ResolutionError> {
        let store = self.store.as_ref();
        let resolved = resolver::resolve(store, &request.playlist_id).await?;
        let strategy = MutationStrategy::select(request.item_keys.len());

        let report = match request.op {
            MutationOp::Add => {
                executor::execute_add(store, &resolved, &request.item_keys, strategy, self.write_pause)
                    .await
            }
            MutationOp::Remove => executor::execute_remove(store, &resolved, &request.item_keys).await,
        };

        let verification = verifier::verify_count(store, &request.playlist_id, &self.reconcile).await;
        let attempted = request.item_keys.len();

        let (after_count, count_source, polls_used, confidence) = match verification {
            Verification::Observed {
                count,
                source,
                polls,
            } => (count, source, polls, Confidence::Normal),
            Verification::Inconclusive { polls } => {
                let effect = acknowledged_effect(request.op, attempted, &report);
                let estimate = outcome::optimistic_estimate(request.op, resolved.before_count, effect);
                (estimate, CountSource::Estimate, polls, Confidence::Degraded)
            }
        };

        let actual_delta = outcome::oriented_delta(request.op, resolved.before_count, after_count);
        let classification = outcome::classify(attempted, actual_delta, report.all_succeeded());

        info!(
            playlist = %resolved.title,
            outcome = classification.as_str(),
            before = resolved.before_count,
            after = after_count,
            delta = actual_delta,
            "mutation finished"
        );

        Ok(MutationResult {
            playlist_id: resolved.playlist_id,
            playlist_title: resolved.title,
            operation: request.op,
            strategy,
            attempted_count: attempted,
            before_count: resolved.before_count,
            after_count,
            actual_delta,
            classification,
            confidence,
            count_source,
            polls_used,
            baseline_confirmed: resolved.baseline_confirmed,
            attempts: report.attempts,
        })
    }
}

/// How many memberships the acknowledged calls should have changed. Adds
/// are one call per key; a remove is one call for the whole batch.
fn acknowledged_effect(op: MutationOp, attempted: usize, report: &ExecutionReport) -> u32 {
    match op {
        MutationOp::Add => report.succeeded_count() as u32,
        MutationOp::Remove => {
            if report.all_succeeded() {
                attempted as u32
            } else {
                0
            }
        }
    }
}
