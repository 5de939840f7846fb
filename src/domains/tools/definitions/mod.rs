//! One file per tool, grouped by what they touch.
//!
//! `library/` holds read-only catalog tools; `playlist/` holds the playlist
//! tools, including the verified add and remove mutations.

pub mod common;
pub mod library;
pub mod playlist;

pub use library::{
    BrowseLibrariesTool, BrowseLibraryTool, LibraryStatsTool, OnDeckTool, RecentlyAddedTool,
    SearchLibraryTool,
};
pub use playlist::{
    AddToPlaylistTool, BrowsePlaylistTool, CreatePlaylistTool, DeletePlaylistTool,
    ListPlaylistsTool, RemoveFromPlaylistTool,
};
