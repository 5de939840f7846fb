//! Helpers shared by the tool definitions.
//!
//! Result formatting, media type mapping, and parameter validation live
//! here so the per-tool files stay small.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

use crate::plex::types::Item;

/// Failed tool answer, logged on the way out.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Successful tool answer wrapping plain text.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Default limit for list results.
pub fn default_limit() -> u32 {
    10
}

/// Clamp a caller-supplied limit into the allowed 1..=100 range.
pub fn validate_limit(limit: u32) -> u32 {
    limit.clamp(1, 100)
}

/// Map a media kind name to the numeric type code Plex expects in
/// `type=` query parameters.
pub fn plex_type_code(kind: &str) -> Option<u32> {
    match kind.to_ascii_lowercase().as_str() {
        "movie" => Some(1),
        "show" => Some(2),
        "season" => Some(3),
        "episode" => Some(4),
        "artist" => Some(8),
        "album" => Some(9),
        "track" => Some(10),
        _ => None,
    }
}

/// The kind names accepted by [`plex_type_code`], for error messages.
pub const KNOWN_ITEM_TYPES: &str = "movie, show, season, episode, artist, album, track";

/// Format a duration in milliseconds as H:MM:SS, or M:SS under an hour.
pub fn format_duration(length_ms: u64) -> String {
    let duration_secs = length_ms / 1000;
    let hours = duration_secs / 3600;
    let minutes = (duration_secs % 3600) / 60;
    let seconds = duration_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Format a Unix timestamp as a calendar date.
pub fn format_date(timestamp: i64) -> String {
    match chrono::DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}

/// One-line label for a media item: title, year, and the artist/album or
/// show/season context when present.
pub fn item_label(item: &Item) -> String {
    let mut label = item.title.clone();
    if let Some(year) = item.year {
        label.push_str(&format!(" ({})", year));
    }
    match (&item.grandparent_title, &item.parent_title) {
        (Some(grandparent), Some(parent)) => {
            label.push_str(&format!(" - {} / {}", grandparent, parent));
        }
        (Some(grandparent), None) => label.push_str(&format!(" - {}", grandparent)),
        (None, Some(parent)) => label.push_str(&format!(" - {}", parent)),
        (None, None) => {}
    }
    if let Some(duration) = item.duration {
        label.push_str(&format!(" [{}]", format_duration(duration)));
    }
    label
}

/// Numbered listing of items. Every line carries the rating key, since
/// that is what the playlist tools take as input.
pub fn item_list(items: &[Item]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{}. {} (key: {})", index + 1, item_label(item), item.rating_key))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::testing::wire_item;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(180000), "3:00");
        assert_eq!(format_duration(245000), "4:05");
        assert_eq!(format_duration(59000), "0:59");
        assert_eq!(format_duration(7_322_000), "2:02:02");
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(10), 10);
        assert_eq!(validate_limit(0), 1);
        assert_eq!(validate_limit(200), 100);
    }

    #[test]
    fn test_plex_type_code() {
        assert_eq!(plex_type_code("movie"), Some(1));
        assert_eq!(plex_type_code("Track"), Some(10));
        assert_eq!(plex_type_code("podcast"), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "1970-01-01");
        assert_eq!(format_date(1_700_000_000), "2023-11-14");
    }

    #[test]
    fn test_item_label_with_context() {
        let mut item = wire_item("1");
        item.title = "Comfortably Numb".to_string();
        item.grandparent_title = Some("Pink Floyd".to_string());
        item.parent_title = Some("The Wall".to_string());
        item.duration = Some(382_000);
        assert_eq!(
            item_label(&item),
            "Comfortably Numb - Pink Floyd / The Wall [6:22]"
        );
    }

    #[test]
    fn test_item_label_bare() {
        let mut item = wire_item("2");
        item.title = "Heat".to_string();
        item.item_type = Some("movie".to_string());
        item.year = Some(1995);
        item.duration = None;
        assert_eq!(item_label(&item), "Heat (1995)");
    }

    #[test]
    fn test_item_list_carries_keys() {
        let items = vec![wire_item("11"), wire_item("12")];
        let listing = item_list(&items);
        assert!(listing.contains("1. Item 11"));
        assert!(listing.contains("(key: 12)"));
    }

    #[test]
    fn test_error_result_flags_error() {
        let result = error_result("boom");
        assert!(result.is_error.unwrap_or(false));
    }
}
