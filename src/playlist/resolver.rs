//! Pre-write resolution: server identity and playlist baseline.

use thiserror::Error;
use tracing::{debug, warn};

use crate::plex::error::PlexError;
use crate::plex::types::library_item_uri;
use crate::playlist::store::PlaylistStore;

/// Fallback title when the playlist could not be read before the write.
const UNKNOWN_TITLE: &str = "Unknown Playlist";

/// The only error a mutation can abort with. Without the machine
/// identifier no item URI can be built, so nothing has been written yet
/// when this surfaces.
#[derive(Debug, Error)]
#[error("could not establish server identity: {source}")]
pub struct ResolutionError {
    #[from]
    source: PlexError,
}

/// Everything the later stages need that must be captured before the
/// first write call goes out.
#[derive(Debug, Clone)]
pub struct ResolvedPlaylist {
    pub machine_identifier: String,
    pub playlist_id: String,
    pub title: String,
    /// Membership count observed before the write. Zero when unconfirmed.
    pub before_count: u32,
    /// False when the item listing failed and the baseline is assumed.
    pub baseline_confirmed: bool,
}

impl ResolvedPlaylist {
    /// Fully-qualified URI for one of this server's items.
    pub fn item_reference(&self, rating_key: &str) -> String {
        library_item_uri(&self.machine_identifier, rating_key)
    }
}

/// Captures identity and baseline for one mutation.
///
/// Identity failure is fatal. A failed baseline read is not: the mutation
/// proceeds against an unconfirmed zero baseline and the final result is
/// marked accordingly.
pub async fn resolve(
    store: &dyn PlaylistStore,
    playlist_id: &str,
) -> Result<ResolvedPlaylist, ResolutionError> {
    let machine_identifier = store.machine_identifier().await?;

    match store.playlist_items(playlist_id).await {
        Ok(listing) => {
            let before_count = listing.metadata.len() as u32;
            let title = listing
                .title
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
            debug!(playlist_id, before_count, %title, "baseline captured");
            Ok(ResolvedPlaylist {
                machine_identifier,
                playlist_id: playlist_id.to_string(),
                title,
                before_count,
                baseline_confirmed: true,
            })
        }
        Err(err) => {
            warn!(playlist_id, error = %err, "baseline read failed, proceeding unconfirmed");
            Ok(ResolvedPlaylist {
                machine_identifier,
                playlist_id: playlist_id.to_string(),
                title: UNKNOWN_TITLE.to_string(),
                before_count: 0,
                baseline_confirmed: false,
            })
        }
    }
}
