//! Prompt registry.
//!
//! The single list of prompts the server offers. `PromptService` builds its
//! lookup table from [`get_all_prompts`], so registering a prompt here is
//! all it takes to make it servable.

use super::definitions::{
    CleanupDuplicatesPrompt, CuratePlaylistPrompt, LibraryReportPrompt, PromptDefinition,
};
use super::templates::PromptTemplate;

fn build_template<P: PromptDefinition>() -> PromptTemplate {
    PromptTemplate {
        name: P::NAME.to_string(),
        description: Some(P::DESCRIPTION.to_string()),
        arguments: P::arguments(),
        template: P::template().to_string(),
    }
}

/// Every registered prompt, as render-ready templates.
pub fn get_all_prompts() -> Vec<PromptTemplate> {
    vec![
        build_template::<CuratePlaylistPrompt>(),
        build_template::<CleanupDuplicatesPrompt>(),
        build_template::<LibraryReportPrompt>(),
    ]
}

/// Names of every registered prompt.
pub fn prompt_names() -> Vec<&'static str> {
    vec![
        CuratePlaylistPrompt::NAME,
        CleanupDuplicatesPrompt::NAME,
        LibraryReportPrompt::NAME,
    ]
}
