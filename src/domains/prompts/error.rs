//! Errors raised while listing or rendering prompts.

use thiserror::Error;

/// Failures while listing or rendering prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    /// No prompt is registered under the requested name.
    #[error("no prompt named {0:?}")]
    NotFound(String),

    /// The client left out an argument the prompt requires.
    #[error("required argument {0:?} was not provided")]
    MissingArgument(String),

    /// The template text itself is malformed.
    #[error("broken prompt template: {0}")]
    TemplateError(String),
}

impl PromptError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn missing_argument(arg: impl Into<String>) -> Self {
        Self::MissingArgument(arg.into())
    }

    pub fn template(msg: impl Into<String>) -> Self {
        Self::TemplateError(msg.into())
    }
}
