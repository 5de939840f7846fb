//! Write execution with per-call evidence.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::plex::error::PlexError;
use crate::playlist::resolver::ResolvedPlaylist;
use crate::playlist::store::PlaylistStore;
use crate::playlist::strategy::MutationStrategy;

/// Evidence from one write call.
///
/// For adds there is one attempt per item key. Removal goes out as a single
/// batched call, so its one attempt covers every key.
#[derive(Debug, Clone, Serialize)]
pub struct MutationAttempt {
    pub item_key: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationAttempt {
    fn success(item_key: &str, status: u16) -> Self {
        Self {
            item_key: item_key.to_string(),
            succeeded: true,
            http_status: Some(status),
            error: None,
        }
    }

    fn failure(item_key: &str, err: &PlexError) -> Self {
        Self {
            item_key: item_key.to_string(),
            succeeded: false,
            http_status: err.http_status(),
            error: Some(err.to_string()),
        }
    }
}

/// All attempts from one mutation, in issue order.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub attempts: Vec<MutationAttempt>,
}

impl ExecutionReport {
    /// True when every call was acknowledged. Vacuously true with no calls.
    pub fn all_succeeded(&self) -> bool {
        self.attempts.iter().all(|a| a.succeeded)
    }

    pub fn succeeded_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.succeeded).count()
    }
}

/// Issues one add call per item key, pausing between sequential calls.
///
/// A failed call never stops the run: later keys still get their chance
/// and the failure is recorded in the report.
pub async fn execute_add(
    store: &dyn PlaylistStore,
    resolved: &ResolvedPlaylist,
    item_keys: &[String],
    strategy: MutationStrategy,
    pause: Duration,
) -> ExecutionReport {
    let mut attempts = Vec::with_capacity(item_keys.len());

    for (index, key) in item_keys.iter().enumerate() {
        if index > 0 && strategy == MutationStrategy::Sequential && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let uri = resolved.item_reference(key);
        match store.add_item(&resolved.playlist_id, &uri).await {
            Ok(status) => {
                debug!(item_key = %key, status, "add acknowledged");
                attempts.push(MutationAttempt::success(key, status));
            }
            Err(err) => {
                warn!(item_key = %key, error = %err, "add call failed, continuing");
                attempts.push(MutationAttempt::failure(key, &err));
            }
        }
    }

    ExecutionReport { attempts }
}

/// Removes every requested key in one batched call.
///
/// The server removes by membership, so batching loses nothing: there is
/// no per-item acknowledgement to preserve.
pub async fn execute_remove(
    store: &dyn PlaylistStore,
    resolved: &ResolvedPlaylist,
    item_keys: &[String],
) -> ExecutionReport {
    let uris = item_keys
        .iter()
        .map(|key| resolved.item_reference(key))
        .collect::<Vec<_>>()
        .join(",");
    let batch_label = item_keys.join(",");

    let attempt = match store.remove_items(&resolved.playlist_id, &uris).await {
        Ok(status) => {
            debug!(item_keys = %batch_label, status, "remove acknowledged");
            MutationAttempt::success(&batch_label, status)
        }
        Err(err) => {
            warn!(item_keys = %batch_label, error = %err, "remove call failed");
            MutationAttempt::failure(&batch_label, &err)
        }
    };

    ExecutionReport {
        attempts: vec![attempt],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::store::MockPlaylistStore;
    use crate::playlist::testing::{keys, resolved_playlist};

    #[tokio::test]
    async fn test_add_continues_past_failed_call() {
        let mut store = MockPlaylistStore::new();
        store.expect_add_item().returning(|_, uri| {
            if uri.ends_with("/2") {
                Err(PlexError::Status { status: 500 })
            } else {
                Ok(200)
            }
        });

        let resolved = resolved_playlist(0);
        let report = execute_add(
            &store,
            &resolved,
            &keys(&["1", "2", "3"]),
            MutationStrategy::Sequential,
            Duration::ZERO,
        )
        .await;

        assert_eq!(report.attempts.len(), 3);
        assert_eq!(report.succeeded_count(), 2);
        assert!(!report.all_succeeded());
        assert!(!report.attempts[1].succeeded);
        assert_eq!(report.attempts[1].http_status, Some(500));
        assert!(report.attempts[2].succeeded);
    }

    #[tokio::test]
    async fn test_add_builds_qualified_uris() {
        let mut store = MockPlaylistStore::new();
        store
            .expect_add_item()
            .withf(|playlist_id, uri| {
                playlist_id == "7"
                    && uri == "server://m-1/com.plexapp.plugins.library/library/metadata/42"
            })
            .returning(|_, _| Ok(200));

        let resolved = resolved_playlist(0);
        let report = execute_add(
            &store,
            &resolved,
            &keys(&["42"]),
            MutationStrategy::Direct,
            Duration::from_millis(250),
        )
        .await;

        assert!(report.all_succeeded());
        assert_eq!(report.attempts[0].item_key, "42");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_adds_are_paced() {
        let mut store = MockPlaylistStore::new();
        store.expect_add_item().returning(|_, _| Ok(200));

        let resolved = resolved_playlist(0);
        let started = tokio::time::Instant::now();
        execute_add(
            &store,
            &resolved,
            &keys(&["1", "2", "3"]),
            MutationStrategy::Sequential,
            Duration::from_millis(250),
        )
        .await;

        // Two pauses for three calls: before the second and third.
        assert_eq!(started.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_direct_add_is_not_paced() {
        let mut store = MockPlaylistStore::new();
        store.expect_add_item().returning(|_, _| Ok(200));

        let resolved = resolved_playlist(0);
        let started = tokio::time::Instant::now();
        execute_add(
            &store,
            &resolved,
            &keys(&["1"]),
            MutationStrategy::Direct,
            Duration::from_millis(250),
        )
        .await;

        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_remove_is_one_batched_call() {
        let expected = "server://m-1/com.plexapp.plugins.library/library/metadata/5,\
                        server://m-1/com.plexapp.plugins.library/library/metadata/6";

        let mut store = MockPlaylistStore::new();
        store
            .expect_remove_items()
            .times(1)
            .withf(move |_, uris| uris == expected)
            .returning(|_, _| Ok(200));

        let resolved = resolved_playlist(4);
        let report = execute_remove(&store, &resolved, &keys(&["5", "6"])).await;

        assert_eq!(report.attempts.len(), 1);
        assert!(report.all_succeeded());
        assert_eq!(report.attempts[0].item_key, "5,6");
    }

    #[tokio::test]
    async fn test_failed_remove_records_status() {
        let mut store = MockPlaylistStore::new();
        store
            .expect_remove_items()
            .returning(|_, _| Err(PlexError::Status { status: 404 }));

        let resolved = resolved_playlist(4);
        let report = execute_remove(&store, &resolved, &keys(&["5"])).await;

        assert!(!report.all_succeeded());
        assert_eq!(report.attempts[0].http_status, Some(404));
        assert!(report.attempts[0].error.is_some());
    }
}
