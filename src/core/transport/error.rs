//! Failure modes shared by the transports.

use thiserror::Error;

/// Shorthand used throughout the transport layer.
pub type TransportResult<T> = Result<T, TransportError>;

/// Ways a transport can fail to start or fall over while serving.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The listen address is taken or unroutable.
    #[error("could not bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The rmcp service could not be brought up.
    #[error("transport startup failed: {0}")]
    Startup(String),

    /// The axum server returned an error while serving.
    #[error("HTTP server error: {0}")]
    Http(String),

    /// A running session terminated abnormally.
    #[error("session ended with error: {0}")]
    Session(String),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn startup(msg: impl Into<String>) -> Self {
        Self::Startup(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }
}
