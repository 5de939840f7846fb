//! Playlist curation prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Guided workflow for building a themed playlist from the library.
pub struct CuratePlaylistPrompt;

impl PromptDefinition for CuratePlaylistPrompt {
    const NAME: &'static str = "curate_playlist";
    const DESCRIPTION: &'static str =
        "Build a themed playlist from the library using the verified playlist tools";

    fn template() -> &'static str {
        r#"Curate a playlist around this theme: {{theme}}

{{#if section}}Work within library section {{section}}.{{else}}Search across the whole library.{{/if}}

Follow these steps:

1. Use search_library to find items fitting the theme. Collect the rating
   key of each candidate.
2. Create the playlist with create_playlist, seeding it with the strongest
   candidate.{{#if title}} Title it "{{title}}".{{/if}}
3. Add the remaining candidates with add_to_playlist. Pass the keys in the
   order they should play.
4. Read the mutation report carefully. FULL_SUCCESS means every item
   landed. On PARTIAL_SUCCESS, the per-item call list names which adds
   failed; retry just those keys. A degraded confidence means the counts
   are projected, so confirm with browse_playlist before trusting them.
5. Finish by browsing the playlist and presenting the final track order.

Do not assume an add worked because the call returned. Only the report's
classification and counts say what the server actually did."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "theme".to_string(),
                title: None,
                description: Some("The theme or mood the playlist should follow".to_string()),
                required: Some(true),
            },
            PromptArgument {
                name: "title".to_string(),
                title: None,
                description: Some("Title for the new playlist".to_string()),
                required: Some(false),
            },
            PromptArgument {
                name: "section".to_string(),
                title: None,
                description: Some("Library section id to draw items from".to_string()),
                required: Some(false),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curate_playlist_metadata() {
        assert_eq!(CuratePlaylistPrompt::NAME, "curate_playlist");
        assert!(!CuratePlaylistPrompt::DESCRIPTION.is_empty());

        let args = CuratePlaylistPrompt::arguments();
        assert_eq!(args.len(), 3);

        // theme is required
        assert_eq!(args[0].required, Some(true));
        // title and section are optional
        assert_eq!(args[1].required, Some(false));
        assert_eq!(args[2].required, Some(false));
    }

    #[test]
    fn test_template_names_the_tools() {
        let template = CuratePlaylistPrompt::template();
        assert!(template.contains("search_library"));
        assert!(template.contains("create_playlist"));
        assert!(template.contains("add_to_playlist"));
    }
}
