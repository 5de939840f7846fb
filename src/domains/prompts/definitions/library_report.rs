//! Library report prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Guided workflow for summarizing the state of the media library.
pub struct LibraryReportPrompt;

impl PromptDefinition for LibraryReportPrompt {
    const NAME: &'static str = "library_report";
    const DESCRIPTION: &'static str =
        "Produce an overview of the library: sizes, recent additions, and what is in progress";

    fn template() -> &'static str {
        r#"Produce a report on the media library.

{{#if section}}Limit the report to library section {{section}}.{{else}}Cover every library section.{{/if}}

Gather the data with these tools:

1. get_library_stats for the item count of each section.
2. get_recently_added for what arrived lately.
3. get_on_deck for partially watched items.
4. list_playlists for how the library is organized into playlists.

Then write a short report covering library size per section, notable
recent additions, and what is currently in progress.
{{#if focus}}
Give particular attention to: {{focus}}
{{/if}}"#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "section".to_string(),
                title: None,
                description: Some("Library section id to limit the report to".to_string()),
                required: Some(false),
            },
            PromptArgument {
                name: "focus".to_string(),
                title: None,
                description: Some(
                    "Aspect to emphasize (e.g., recent additions, unwatched items)".to_string(),
                ),
                required: Some(false),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_report_metadata() {
        assert_eq!(LibraryReportPrompt::NAME, "library_report");

        let args = LibraryReportPrompt::arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].required, Some(false));
        assert_eq!(args[1].required, Some(false));
    }

    #[test]
    fn test_template_names_the_tools() {
        let template = LibraryReportPrompt::template();
        assert!(template.contains("get_library_stats"));
        assert!(template.contains("get_recently_added"));
        assert!(template.contains("get_on_deck"));
    }
}
