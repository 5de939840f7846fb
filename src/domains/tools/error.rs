//! Errors raised during tool dispatch.

use thiserror::Error;

/// Errors raised while dispatching a tool call.
///
/// Tool execution itself never surfaces here: once a tool runs, failures are
/// reported inside its result payload so the client sees them as content.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("no tool named {0:?}")]
    NotFound(String),

    /// The arguments did not deserialize into the tool's params struct.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
