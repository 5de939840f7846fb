//! Playlist items resource template definition.
//!
//! Unlike the fixed-URI resources, playlist contents are exposed through a
//! URI template. Clients substitute a playlist id into the template and
//! read the resulting URI for a live listing.

/// Parameterized live view of a playlist's items.
pub struct PlaylistItemsResource;

impl PlaylistItemsResource {
    /// RFC 6570 URI template for this resource.
    pub const URI_TEMPLATE: &'static str = "plex://playlists/{playlist_id}/items";

    /// The display name of the template.
    pub const NAME: &'static str = "Playlist Items";

    /// A description of the template.
    pub const DESCRIPTION: &'static str =
        "Live listing of a playlist's items by playlist id (rating key)";

    /// The MIME type of resolved content.
    pub const MIME_TYPE: &'static str = "application/json";

    /// Extract the playlist id from a concrete URI matching the template.
    ///
    /// Returns `None` for URIs outside the template or with an empty id.
    pub fn playlist_id_from_uri(uri: &str) -> Option<&str> {
        let id = uri
            .strip_prefix("plex://playlists/")?
            .strip_suffix("/items")?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_id_extracted() {
        assert_eq!(
            PlaylistItemsResource::playlist_id_from_uri("plex://playlists/42/items"),
            Some("42")
        );
    }

    #[test]
    fn test_unrelated_uris_rejected() {
        assert_eq!(
            PlaylistItemsResource::playlist_id_from_uri("plex://server/info"),
            None
        );
        assert_eq!(
            PlaylistItemsResource::playlist_id_from_uri("plex://playlists//items"),
            None
        );
        assert_eq!(
            PlaylistItemsResource::playlist_id_from_uri("plex://playlists/42/items/extra"),
            None
        );
    }
}
