//! Playlist tools: listing, browsing, creation, and verified mutation.
//!
//! The add and remove tools never return a bare acknowledgement. Every
//! mutation runs through the engine in [`crate::playlist`] and reports a
//! classified outcome with count evidence.

pub mod add_items;
pub mod browse;
pub mod create;
pub mod delete;
pub mod list;
pub mod remove_items;
pub mod report;

pub use add_items::AddToPlaylistTool;
pub use browse::BrowsePlaylistTool;
pub use create::CreatePlaylistTool;
pub use delete::DeletePlaylistTool;
pub use list::ListPlaylistsTool;
pub use remove_items::RemoveFromPlaylistTool;
