//! HTTP client for the Plex Media Server API.
//!
//! Plex wraps every JSON response in a `MediaContainer` envelope and keys
//! media items by `ratingKey`. This module owns the wire types, the reqwest
//! client, and the error type shared by everything that talks to the server.

pub mod client;
pub mod error;
pub mod types;

pub use client::PlexClient;
pub use error::{PlexError, PlexResult};
pub use types::{Identity, Item, MediaContainer, Playlist, Section, library_item_uri};

#[cfg(test)]
pub mod testing {
    use super::client::PlexClient;
    use crate::core::config::PlexConfig;

    /// A client pointing at nothing, for tests whose code path must fail
    /// validation before any request goes out.
    pub fn offline_client() -> PlexClient {
        PlexClient::new(&PlexConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            token: Some("test-token".to_string()),
            request_timeout_secs: 1,
        })
        .unwrap()
    }
}
