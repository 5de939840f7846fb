//! Typed wire model for Plex API responses.
//!
//! Every Plex endpoint nests its payload inside a top-level `MediaContainer`.
//! List endpoints carry their rows under `Metadata` (or `Directory` for
//! library sections), and most fields come and go depending on server
//! version, so nearly everything here is optional with serde defaults.

use serde::Deserialize;

/// Top-level envelope around a `Metadata` list response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    pub media_container: MediaContainer<T>,
}

/// The inner `MediaContainer` payload of a list endpoint.
///
/// `title` is set on playlist item listings to the playlist's own title.
/// For paged requests `total_size` holds the full row count even when
/// `metadata` only carries one page.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct MediaContainer<T> {
    #[serde(default)]
    pub size: Option<u32>,

    #[serde(rename = "totalSize", default)]
    pub total_size: Option<u32>,

    #[serde(default)]
    pub offset: Option<u32>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<T>,
}

/// Envelope for `/identity`, where the fields of interest sit directly on
/// the container instead of under `Metadata`.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEnvelope {
    #[serde(rename = "MediaContainer")]
    pub media_container: IdentityContainer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityContainer {
    #[serde(rename = "machineIdentifier", default)]
    pub machine_identifier: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

/// Validated server identity, produced from [`IdentityEnvelope`].
#[derive(Debug, Clone)]
pub struct Identity {
    /// Stable identifier baked into item URIs.
    pub machine_identifier: String,
    pub version: Option<String>,
}

/// Envelope for `/library/sections`, which lists under `Directory`.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionsEnvelope {
    #[serde(rename = "MediaContainer")]
    pub media_container: SectionsContainer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    pub directories: Vec<Section>,
}

/// A library section. `key` is the section id used in `/library/sections/{key}`
/// paths; `section_type` is `movie`, `show`, `artist` (music), or `photo`.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub section_type: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// A playlist row from `/playlists` or `/playlists/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    #[serde(rename = "ratingKey")]
    pub rating_key: String,

    pub title: String,

    #[serde(rename = "playlistType", default)]
    pub playlist_type: Option<String>,

    #[serde(default)]
    pub smart: Option<bool>,

    /// Item count as reported by playlist metadata. Lags behind recent
    /// writes more often than the item listing does.
    #[serde(rename = "leafCount", default)]
    pub leaf_count: Option<u32>,

    #[serde(default)]
    pub duration: Option<u64>,

    #[serde(default)]
    pub summary: Option<String>,
}

/// A media item: a movie, episode, track, or any other leaf the server
/// returns from search, library browsing, or playlist listings.
///
/// `grandparent_title`/`parent_title` hold artist/album for tracks and
/// show/season for episodes.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    #[serde(rename = "ratingKey")]
    pub rating_key: String,

    pub title: String,

    #[serde(rename = "type", default)]
    pub item_type: Option<String>,

    #[serde(default)]
    pub year: Option<u32>,

    #[serde(default)]
    pub duration: Option<u64>,

    #[serde(rename = "grandparentTitle", default)]
    pub grandparent_title: Option<String>,

    #[serde(rename = "parentTitle", default)]
    pub parent_title: Option<String>,

    #[serde(default)]
    pub index: Option<u32>,

    #[serde(rename = "addedAt", default)]
    pub added_at: Option<i64>,

    #[serde(rename = "viewOffset", default)]
    pub view_offset: Option<u64>,

    #[serde(default)]
    pub summary: Option<String>,
}

/// Builds the fully-qualified URI Plex expects when adding items to a
/// playlist: `server://{machine_id}/com.plexapp.plugins.library/library/metadata/{key}`.
pub fn library_item_uri(machine_identifier: &str, rating_key: &str) -> String {
    format!(
        "server://{}/com.plexapp.plugins.library/library/metadata/{}",
        machine_identifier, rating_key
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_playlist_listing() {
        let body = serde_json::json!({
            "MediaContainer": {
                "size": 1,
                "Metadata": [{
                    "ratingKey": "501",
                    "title": "Road Trip",
                    "playlistType": "audio",
                    "smart": false,
                    "leafCount": 42,
                    "duration": 9_000_000
                }]
            }
        });

        let envelope: Envelope<Playlist> = serde_json::from_value(body).unwrap();
        let playlists = envelope.media_container.metadata;
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].rating_key, "501");
        assert_eq!(playlists[0].leaf_count, Some(42));
        assert_eq!(playlists[0].playlist_type.as_deref(), Some("audio"));
    }

    #[test]
    fn test_deserialize_empty_playlist_items() {
        // An empty playlist omits `Metadata` entirely.
        let body = serde_json::json!({
            "MediaContainer": { "size": 0, "title": "Empty" }
        });

        let envelope: Envelope<Item> = serde_json::from_value(body).unwrap();
        assert!(envelope.media_container.metadata.is_empty());
        assert_eq!(envelope.media_container.title.as_deref(), Some("Empty"));
    }

    #[test]
    fn test_deserialize_track_item() {
        let body = serde_json::json!({
            "MediaContainer": {
                "size": 1,
                "Metadata": [{
                    "ratingKey": "1001",
                    "title": "Comfortably Numb",
                    "type": "track",
                    "grandparentTitle": "Pink Floyd",
                    "parentTitle": "The Wall",
                    "index": 6,
                    "duration": 382_000
                }]
            }
        });

        let envelope: Envelope<Item> = serde_json::from_value(body).unwrap();
        let item = &envelope.media_container.metadata[0];
        assert_eq!(item.grandparent_title.as_deref(), Some("Pink Floyd"));
        assert_eq!(item.parent_title.as_deref(), Some("The Wall"));
        assert_eq!(item.year, None);
    }

    #[test]
    fn test_deserialize_identity() {
        let body = serde_json::json!({
            "MediaContainer": {
                "size": 0,
                "machineIdentifier": "abc123def456",
                "version": "1.40.1.8227"
            }
        });

        let envelope: IdentityEnvelope = serde_json::from_value(body).unwrap();
        assert_eq!(
            envelope.media_container.machine_identifier.as_deref(),
            Some("abc123def456")
        );
    }

    #[test]
    fn test_deserialize_sections() {
        let body = serde_json::json!({
            "MediaContainer": {
                "Directory": [
                    { "key": "1", "title": "Movies", "type": "movie" },
                    { "key": "3", "title": "Music", "type": "artist", "language": "en-US" }
                ]
            }
        });

        let envelope: SectionsEnvelope = serde_json::from_value(body).unwrap();
        let sections = envelope.media_container.directories;
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].section_type, "artist");
        assert_eq!(sections[1].language.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_library_item_uri_format() {
        assert_eq!(
            library_item_uri("machine-1", "4242"),
            "server://machine-1/com.plexapp.plugins.library/library/metadata/4242"
        );
    }
}
