//! Duplicate cleanup prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Guided workflow for deduplicating a playlist without losing tracks.
///
/// Removal is by membership, so the naive "remove one copy" approach
/// silently deletes every copy. The template walks through the safe
/// remove-then-readd sequence.
pub struct CleanupDuplicatesPrompt;

impl PromptDefinition for CleanupDuplicatesPrompt {
    const NAME: &'static str = "cleanup_duplicates";
    const DESCRIPTION: &'static str =
        "Remove duplicate entries from a playlist while keeping one copy of each item";

    fn template() -> &'static str {
        r#"Clean up duplicate entries in playlist {{playlist_id}}.

Important: remove_from_playlist removes by membership. Asking it to remove
a key deletes EVERY entry of that item, so you cannot remove just the
second copy directly.

Follow these steps:

1. Use browse_playlist on playlist {{playlist_id}} and note which rating
   keys appear more than once.
2. For each duplicated key, call remove_from_playlist with that key. The
   report's delta will exceed the number of keys you passed; the overshoot
   note confirms all copies were dropped.
3. Re-add one copy of each of those keys with add_to_playlist.
4. Check that the final report classifies as FULL_SUCCESS, then browse the
   playlist again to confirm each previously duplicated item now appears
   exactly once.

Report how many duplicate entries were removed and the playlist's final
item count."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![PromptArgument {
            name: "playlist_id".to_string(),
            title: None,
            description: Some("Playlist id (rating key) to deduplicate".to_string()),
            required: Some(true),
        }]
    }
}
