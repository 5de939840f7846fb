//! Shared fixtures for mutation tests: wire-type builders and a scripted
//! in-memory store that mimics the server's playlist semantics, including
//! duplicate-ignoring adds and membership-wide removal.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::plex::error::{PlexError, PlexResult};
use crate::plex::types::{Item, MediaContainer, Playlist};
use crate::playlist::resolver::ResolvedPlaylist;
use crate::playlist::store::PlaylistStore;

/// A wire item carrying only what the engine reads.
pub fn wire_item(rating_key: &str) -> Item {
    Item {
        rating_key: rating_key.to_string(),
        title: format!("Item {rating_key}"),
        item_type: Some("track".to_string()),
        year: None,
        duration: None,
        grandparent_title: None,
        parent_title: None,
        index: None,
        added_at: None,
        view_offset: None,
        summary: None,
    }
}

pub fn items_container(title: Option<&str>, item_keys: &[&str]) -> MediaContainer<Item> {
    MediaContainer {
        size: Some(item_keys.len() as u32),
        total_size: None,
        offset: None,
        title: title.map(str::to_string),
        metadata: item_keys.iter().map(|key| wire_item(key)).collect(),
    }
}

pub fn keys(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub fn resolved_playlist(before_count: u32) -> ResolvedPlaylist {
    ResolvedPlaylist {
        machine_identifier: "m-1".to_string(),
        playlist_id: "7".to_string(),
        title: "Fixture".to_string(),
        before_count,
        baseline_confirmed: true,
    }
}

/// What scripted metadata reads return.
#[derive(Debug, Clone, Copy)]
pub enum MetadataMode {
    /// `leafCount` tracks the live item count.
    LeafCount,
    /// Metadata reads succeed but carry no `leafCount`.
    MissingLeaf,
    /// Metadata reads fail with HTTP 503.
    Failing,
}

/// In-memory playlist with scriptable failures.
///
/// Listing calls consume `listing_outcomes` front to back (`false` fails
/// with HTTP 503); once the plan runs out every listing succeeds. Adds of
/// keys in the failing set return HTTP 500. Adding a key that is already a
/// member is acknowledged without changing anything, matching the server's
/// duplicate handling. Removal drops every occurrence of each key.
pub struct ScriptedStore {
    state: Mutex<State>,
}

struct State {
    items: Vec<String>,
    title: String,
    failing_add_keys: HashSet<String>,
    listing_outcomes: VecDeque<bool>,
    metadata_mode: MetadataMode,
    add_log: Vec<String>,
}

impl ScriptedStore {
    pub fn with_items(item_keys: &[&str]) -> Self {
        Self {
            state: Mutex::new(State {
                items: keys(item_keys),
                title: "Scripted".to_string(),
                failing_add_keys: HashSet::new(),
                listing_outcomes: VecDeque::new(),
                metadata_mode: MetadataMode::LeafCount,
                add_log: Vec::new(),
            }),
        }
    }

    pub fn failing_adds(self, item_keys: &[&str]) -> Self {
        self.state.lock().unwrap().failing_add_keys = keys(item_keys).into_iter().collect();
        self
    }

    pub fn listing_outcomes(self, plan: &[bool]) -> Self {
        self.state.lock().unwrap().listing_outcomes = plan.iter().copied().collect();
        self
    }

    pub fn metadata_mode(self, mode: MetadataMode) -> Self {
        self.state.lock().unwrap().metadata_mode = mode;
        self
    }

    /// Current membership, in order.
    pub fn items_snapshot(&self) -> Vec<String> {
        self.state.lock().unwrap().items.clone()
    }

    /// Keys of add calls received, in arrival order.
    pub fn add_log(&self) -> Vec<String> {
        self.state.lock().unwrap().add_log.clone()
    }

    fn key_from_uri(uri: &str) -> String {
        uri.rsplit('/').next().unwrap_or_default().to_string()
    }
}

#[async_trait]
impl PlaylistStore for ScriptedStore {
    async fn machine_identifier(&self) -> PlexResult<String> {
        Ok("scripted-machine".to_string())
    }

    async fn playlist_metadata(&self, _playlist_id: &str) -> PlexResult<Playlist> {
        let state = self.state.lock().unwrap();
        let leaf_count = match state.metadata_mode {
            MetadataMode::LeafCount => Some(state.items.len() as u32),
            MetadataMode::MissingLeaf => None,
            MetadataMode::Failing => return Err(PlexError::Status { status: 503 }),
        };
        Ok(Playlist {
            rating_key: "7".to_string(),
            title: state.title.clone(),
            playlist_type: Some("audio".to_string()),
            smart: Some(false),
            leaf_count,
            duration: None,
            summary: None,
        })
    }

    async fn playlist_items(&self, _playlist_id: &str) -> PlexResult<MediaContainer<Item>> {
        let mut state = self.state.lock().unwrap();
        if let Some(outcome) = state.listing_outcomes.pop_front()
            && !outcome
        {
            return Err(PlexError::Status { status: 503 });
        }
        Ok(MediaContainer {
            size: Some(state.items.len() as u32),
            total_size: None,
            offset: None,
            title: Some(state.title.clone()),
            metadata: state.items.iter().map(|key| wire_item(key)).collect(),
        })
    }

    async fn add_item(&self, _playlist_id: &str, item_uri: &str) -> PlexResult<u16> {
        let key = Self::key_from_uri(item_uri);
        let mut state = self.state.lock().unwrap();
        state.add_log.push(key.clone());
        if state.failing_add_keys.contains(&key) {
            return Err(PlexError::Status { status: 500 });
        }
        if !state.items.contains(&key) {
            state.items.push(key);
        }
        Ok(200)
    }

    async fn remove_items(&self, _playlist_id: &str, item_uris: &str) -> PlexResult<u16> {
        let mut state = self.state.lock().unwrap();
        for uri in item_uris.split(',') {
            let key = Self::key_from_uri(uri);
            state.items.retain(|existing| existing != &key);
        }
        Ok(200)
    }
}
