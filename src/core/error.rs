//! The crate-level error boundary.
//!
//! One enum over every subsystem's error type, so a library consumer can
//! apply `?` against a single [`Result`] alias without caring which domain
//! a failure came from.

use thiserror::Error;

/// Alias used by the binary and by library consumers.
pub type Result<T> = std::result::Result<T, Error>;

/// Sum of every domain failure.
///
/// Inside the server every domain keeps its own error type; this enum only
/// exists at the library boundary, one variant per subsystem.
#[derive(Debug, Error)]
pub enum Error {
    /// Tool dispatch failed.
    #[error("tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Resource listing or read failed.
    #[error("resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Prompt listing or rendering failed.
    #[error("prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    /// The Plex client could not be built or a request failed.
    #[error("Plex error: {0}")]
    Plex(#[from] crate::plex::PlexError),
}
