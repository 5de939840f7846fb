//! One file per prompt: metadata, accepted arguments, and the template
//! text handed to the renderer in `templates.rs`.

use rmcp::model::PromptArgument;

pub mod cleanup_duplicates;
pub mod curate_playlist;
pub mod library_report;

pub use cleanup_duplicates::CleanupDuplicatesPrompt;
pub use curate_playlist::CuratePlaylistPrompt;
pub use library_report::LibraryReportPrompt;

/// Metadata and template source for one prompt.
pub trait PromptDefinition {
    /// Name clients use in prompts/get.
    const NAME: &'static str;

    /// Short description shown in prompts/list.
    const DESCRIPTION: &'static str;

    /// Template text with {{variable}} placeholders.
    fn template() -> &'static str;

    /// Arguments the template understands.
    fn arguments() -> Vec<PromptArgument>;
}
