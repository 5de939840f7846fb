//! Mutation semantics resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Documentation for interpreting playlist mutation results (static Markdown).
pub struct MutationSemanticsResource;

impl ResourceDefinition for MutationSemanticsResource {
    const URI: &'static str = "plex://server/mutation-semantics";
    const NAME: &'static str = "Playlist Mutation Semantics";
    const DESCRIPTION: &'static str =
        "How add_to_playlist and remove_from_playlist verify writes and what their outcome classifications mean";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(DOCUMENTATION.to_string())
    }
}

const DOCUMENTATION: &str = r#"# Playlist Mutation Semantics

Plex acknowledges playlist writes before they are observable: a 2xx on an
add or remove call means the server accepted the request, not that the
playlist already reflects it. The mutation tools therefore never report a
bare acknowledgement. Every call to `add_to_playlist` or
`remove_from_playlist` runs a verification loop and reports what the
server was actually observed to do.

## How a mutation runs

1. **Resolve** - capture the playlist's item count before writing.
2. **Execute** - adds go out one call per item, with a short pause between
   calls so the server ingests them in order. Removes go out as a single
   batched call.
3. **Verify** - poll the playlist's count with linearly growing delays
   until it changes or the polling budget runs out.
4. **Classify** - compare the observed count change against what was
   requested.

## Classifications

- `FULL_SUCCESS` - the observed change covers every requested item.
- `PARTIAL_SUCCESS` - some change was observed, but less than requested.
  The per-item call list in the result shows which calls failed.
- `NOOP_SUCCESS` - no change was observed and none was needed. Adding an
  item that is already in the playlist lands here: the server acknowledges
  the call and ignores the duplicate.
- `HARD_FAILURE` - no change was observed and the calls did not succeed.

## Confidence

- `normal` - the reported counts were observed on the server.
- `degraded` - verification ran out of polling rounds, so `after_count` is
  a projection from the acknowledged calls rather than an observation.
  Browse the playlist to see its actual state.

## Removal is by membership

The server removes every entry of a requested item. A playlist holding the
same track three times loses all three copies from one remove call, so the
observed delta can legitimately exceed the number of requested keys. The
result flags this case; it is not an error.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_semantics_metadata() {
        assert_eq!(
            MutationSemanticsResource::URI,
            "plex://server/mutation-semantics"
        );
        assert_eq!(MutationSemanticsResource::MIME_TYPE, "text/markdown");
    }

    #[test]
    fn test_mutation_semantics_content() {
        match MutationSemanticsResource::content() {
            ResourceContent::Text(text) => {
                assert!(text.contains("FULL_SUCCESS"));
                assert!(text.contains("Removal is by membership"));
            }
            _ => panic!("Expected Text content"),
        }
    }
}
