//! Errors raised while reading resources.

use thiserror::Error;

use crate::plex::PlexError;

/// Failures while listing or reading resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource answers to the requested URI.
    #[error("no resource at {0}")]
    NotFound(String),

    /// A live read against the Plex server failed.
    #[error("Plex request failed: {0}")]
    Plex(#[from] PlexError),

    /// Content that should always serialize did not.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
