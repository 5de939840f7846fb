//! Error type for Plex API calls.

use thiserror::Error;

/// Result alias for Plex API operations.
pub type PlexResult<T> = std::result::Result<T, PlexError>;

/// Failures that can occur while talking to a Plex Media Server.
#[derive(Debug, Error)]
pub enum PlexError {
    /// The request never produced a response (connection refused, DNS,
    /// client-side timeout, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered outside the 2xx range.
    #[error("server returned HTTP {status}")]
    Status { status: u16 },

    /// A 2xx response whose body did not decode into the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The base URL and path could not be joined into a valid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response decoded cleanly but lacked a field we depend on.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl PlexError {
    /// The HTTP status associated with this error, when one was observed.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the request died waiting on the client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }
}
