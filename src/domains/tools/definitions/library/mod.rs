//! Library catalog tools: search, browsing, and server activity.

pub mod browse;
pub mod on_deck;
pub mod recent;
pub mod search;
pub mod sections;
pub mod stats;

pub use browse::BrowseLibraryTool;
pub use on_deck::OnDeckTool;
pub use recent::RecentlyAddedTool;
pub use search::SearchLibraryTool;
pub use sections::BrowseLibrariesTool;
pub use stats::LibraryStatsTool;
