//! Post-write count verification.
//!
//! A 2xx from Plex means "accepted", not "applied". The verifier polls the
//! server with linear backoff until some source yields a membership count,
//! or reports that it never got one.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::playlist::store::PlaylistStore;

/// Polling behavior. Round `n` sleeps `n * base_delay_ms` before asking,
/// so the defaults spread four polls over five seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub poll_order: PollOrder,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            max_retries: 4,
            base_delay_ms: 500,
            poll_order: PollOrder::ItemsFirst,
        }
    }
}

/// Which count source each round consults first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PollOrder {
    /// Item listing first, metadata `leafCount` as fallback.
    ItemsFirst,
    /// Metadata `leafCount` first. Cheaper on huge playlists.
    MetadataFirst,
}

impl PollOrder {
    fn sources(self) -> [PollSource; 2] {
        match self {
            Self::ItemsFirst => [PollSource::Items, PollSource::Metadata],
            Self::MetadataFirst => [PollSource::Metadata, PollSource::Items],
        }
    }
}

impl std::str::FromStr for PollOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "items-first" | "items" => Ok(Self::ItemsFirst),
            "metadata-first" | "metadata" => Ok(Self::MetadataFirst),
            other => Err(format!("unknown poll order: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PollSource {
    Items,
    Metadata,
}

/// Where a reported count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountSource {
    /// Counted rows of the item listing. Ground truth.
    Items,
    /// The playlist metadata's `leafCount`.
    Metadata,
    /// No poll succeeded; the count is an optimistic projection.
    Estimate,
}

/// Result of one verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Observed {
        count: u32,
        source: CountSource,
        polls: u32,
    },
    Inconclusive {
        polls: u32,
    },
}

/// Polls for the playlist's membership count.
///
/// Every round waits first. The write that triggered this verification was
/// just acknowledged, so an immediate read would mostly see the old state.
pub async fn verify_count(
    store: &dyn PlaylistStore,
    playlist_id: &str,
    config: &ReconcileConfig,
) -> Verification {
    for round in 1..=config.max_retries {
        let delay = Duration::from_millis(config.base_delay_ms * u64::from(round));
        tokio::time::sleep(delay).await;

        for source in config.poll_order.sources() {
            match source {
                PollSource::Items => match store.playlist_items(playlist_id).await {
                    Ok(listing) => {
                        let count = listing.metadata.len() as u32;
                        debug!(playlist_id, count, round, "count from item listing");
                        return Verification::Observed {
                            count,
                            source: CountSource::Items,
                            polls: round,
                        };
                    }
                    Err(err) => {
                        debug!(playlist_id, round, error = %err, "item listing poll failed");
                    }
                },
                PollSource::Metadata => match store.playlist_metadata(playlist_id).await {
                    Ok(meta) => match meta.leaf_count {
                        Some(count) => {
                            debug!(playlist_id, count, round, "count from metadata leafCount");
                            return Verification::Observed {
                                count,
                                source: CountSource::Metadata,
                                polls: round,
                            };
                        }
                        None => {
                            debug!(playlist_id, round, "metadata poll carried no leafCount");
                        }
                    },
                    Err(err) => {
                        debug!(playlist_id, round, error = %err, "metadata poll failed");
                    }
                },
            }
        }
    }

    warn!(
        playlist_id,
        polls = config.max_retries,
        "verification exhausted without an observed count"
    );
    Verification::Inconclusive {
        polls: config.max_retries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::testing::{MetadataMode, ScriptedStore};

    fn fast_config() -> ReconcileConfig {
        ReconcileConfig {
            max_retries: 4,
            base_delay_ms: 500,
            poll_order: PollOrder::ItemsFirst,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_round_observes_listing() {
        let store = ScriptedStore::with_items(&["1", "2"]);
        let started = tokio::time::Instant::now();

        let verification = verify_count(&store, "7", &fast_config()).await;

        assert_eq!(
            verification,
            Verification::Observed {
                count: 2,
                source: CountSource::Items,
                polls: 1,
            }
        );
        assert_eq!(started.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_grows_linearly() {
        let store = ScriptedStore::with_items(&[])
            .listing_outcomes(&[false, false, false, false])
            .metadata_mode(MetadataMode::Failing);
        let started = tokio::time::Instant::now();

        let verification = verify_count(&store, "7", &fast_config()).await;

        assert_eq!(verification, Verification::Inconclusive { polls: 4 });
        // 500 + 1000 + 1500 + 2000.
        assert_eq!(started.elapsed(), Duration::from_millis(5000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_metadata_fallback_within_a_round() {
        let store = ScriptedStore::with_items(&["1", "2", "3"])
            .listing_outcomes(&[false])
            .metadata_mode(MetadataMode::LeafCount);

        let verification = verify_count(&store, "7", &fast_config()).await;

        assert_eq!(
            verification,
            Verification::Observed {
                count: 3,
                source: CountSource::Metadata,
                polls: 1,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_metadata_without_leaf_count_is_not_an_observation() {
        let store = ScriptedStore::with_items(&["1"])
            .listing_outcomes(&[false])
            .metadata_mode(MetadataMode::MissingLeaf);

        let verification = verify_count(&store, "7", &fast_config()).await;

        // Round one yields nothing usable; round two's listing succeeds.
        assert_eq!(
            verification,
            Verification::Observed {
                count: 1,
                source: CountSource::Items,
                polls: 2,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_metadata_first_order() {
        let store = ScriptedStore::with_items(&["1", "2"]);
        let config = ReconcileConfig {
            poll_order: PollOrder::MetadataFirst,
            ..fast_config()
        };

        let verification = verify_count(&store, "7", &config).await;

        assert_eq!(
            verification,
            Verification::Observed {
                count: 2,
                source: CountSource::Metadata,
                polls: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_zero_retries_is_immediately_inconclusive() {
        let store = ScriptedStore::with_items(&["1"]);
        let config = ReconcileConfig {
            max_retries: 0,
            ..fast_config()
        };

        let verification = verify_count(&store, "7", &config).await;
        assert_eq!(verification, Verification::Inconclusive { polls: 0 });
    }

    #[test]
    fn test_poll_order_parsing() {
        assert_eq!("items-first".parse(), Ok(PollOrder::ItemsFirst));
        assert_eq!("METADATA".parse(), Ok(PollOrder::MetadataFirst));
        assert!("leaf-count".parse::<PollOrder>().is_err());
    }
}
