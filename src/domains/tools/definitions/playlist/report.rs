//! Rendering of mutation results for tool output.
//!
//! Membership changes never answer with a bare "ok". The caller gets the
//! verified classification, the observed counts, and the per-call
//! evidence, plus the same data as JSON for programmatic use.

use rmcp::model::{CallToolResult, Content};

use crate::playlist::outcome::{Confidence, MutationResult};
use crate::playlist::verifier::CountSource;

/// Renders the human-readable half of a mutation answer.
pub fn render_report(result: &MutationResult) -> String {
    let mut report = format!(
        "## {}: {} on \"{}\"\n\n",
        result.classification.as_str(),
        result.operation,
        result.playlist_title
    );

    report.push_str(&format!(
        "Requested {} item(s); membership went from {} to {} (delta {:+}).\n\n",
        result.attempted_count, result.before_count, result.after_count, result.actual_delta
    ));

    report.push_str(&format!("- Strategy: {}\n", result.strategy.as_str()));
    report.push_str(&format!(
        "- Count source: {} ({} poll(s))\n",
        count_source_label(result.count_source),
        result.polls_used
    ));
    report.push_str(&format!(
        "- Confidence: {}\n",
        match result.confidence {
            Confidence::Normal => "normal",
            Confidence::Degraded => "degraded",
        }
    ));

    if !result.attempts.is_empty() {
        report.push_str("\nCalls:\n");
        for (index, attempt) in result.attempts.iter().enumerate() {
            let line = if attempt.succeeded {
                match attempt.http_status {
                    Some(status) => format!("acknowledged (HTTP {})", status),
                    None => "acknowledged".to_string(),
                }
            } else {
                match &attempt.error {
                    Some(error) => format!("failed: {}", error),
                    None => "failed".to_string(),
                }
            };
            report.push_str(&format!(
                "{}. key {}: {}\n",
                index + 1,
                attempt.item_key,
                line
            ));
        }
    }

    if !result.baseline_confirmed {
        report.push_str(
            "\nNote: the playlist could not be read before the write, so the \
             delta is measured against an assumed empty baseline.\n",
        );
    }
    if result.confidence == Confidence::Degraded {
        report.push_str(
            "\nNote: no post-write count could be observed; the after-count is \
             a projection from acknowledged calls, not a server observation.\n",
        );
    }
    if result.operation == crate::playlist::request::MutationOp::Remove
        && result.actual_delta > result.attempted_count as i64
    {
        report.push_str(
            "\nNote: the count dropped by more than the number of requested \
             keys. Removal is by membership, so duplicate entries of a \
             requested item are all gone.\n",
        );
    }

    report
}

fn count_source_label(source: CountSource) -> &'static str {
    match source {
        CountSource::Items => "item listing",
        CountSource::Metadata => "metadata leafCount",
        CountSource::Estimate => "estimate",
    }
}

/// Wraps a finished mutation into a tool result. A hard failure is flagged
/// as a tool error but still carries the full report and payload.
pub fn into_tool_result(result: MutationResult) -> CallToolResult {
    let mut body = render_report(&result);
    if let Ok(json) = serde_json::to_string_pretty(&result) {
        body.push_str(&format!("\n```json\n{}\n```", json));
    }

    if result.classification.is_success() {
        CallToolResult::success(vec![Content::text(body)])
    } else {
        CallToolResult::error(vec![Content::text(body)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::executor::MutationAttempt;
    use crate::playlist::outcome::Classification;
    use crate::playlist::request::MutationOp;
    use crate::playlist::strategy::MutationStrategy;

    fn result_fixture() -> MutationResult {
        MutationResult {
            playlist_id: "7".to_string(),
            playlist_title: "Road Trip".to_string(),
            operation: MutationOp::Add,
            strategy: MutationStrategy::Sequential,
            attempted_count: 3,
            before_count: 12,
            after_count: 14,
            actual_delta: 2,
            classification: Classification::PartialSuccess,
            confidence: Confidence::Normal,
            count_source: CountSource::Items,
            polls_used: 1,
            baseline_confirmed: true,
            attempts: vec![
                MutationAttempt {
                    item_key: "1001".to_string(),
                    succeeded: true,
                    http_status: Some(200),
                    error: None,
                },
                MutationAttempt {
                    item_key: "1002".to_string(),
                    succeeded: false,
                    http_status: Some(500),
                    error: Some("server returned HTTP 500".to_string()),
                },
                MutationAttempt {
                    item_key: "1003".to_string(),
                    succeeded: true,
                    http_status: Some(200),
                    error: None,
                },
            ],
        }
    }

    #[test]
    fn test_report_carries_counts_and_attempts() {
        let report = render_report(&result_fixture());
        assert!(report.contains("PARTIAL_SUCCESS"));
        assert!(report.contains("from 12 to 14 (delta +2)"));
        assert!(report.contains("2. key 1002: failed: server returned HTTP 500"));
        assert!(report.contains("Strategy: sequential"));
    }

    #[test]
    fn test_degraded_confidence_adds_note() {
        let mut result = result_fixture();
        result.confidence = Confidence::Degraded;
        result.count_source = CountSource::Estimate;
        let report = render_report(&result);
        assert!(report.contains("projection from acknowledged calls"));
    }

    #[test]
    fn test_remove_overshoot_adds_note() {
        let mut result = result_fixture();
        result.operation = MutationOp::Remove;
        result.attempted_count = 1;
        result.actual_delta = 2;
        result.classification = Classification::FullSuccess;
        let report = render_report(&result);
        assert!(report.contains("duplicate entries"));
    }

    #[test]
    fn test_hard_failure_is_tool_error_with_payload() {
        let mut result = result_fixture();
        result.classification = Classification::HardFailure;
        result.actual_delta = 0;
        result.after_count = 12;
        let tool_result = into_tool_result(result);
        assert!(tool_result.is_error.unwrap_or(false));
        let text = match &tool_result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.contains("HARD_FAILURE"));
        assert!(text.contains("```json"));
    }

    #[test]
    fn test_success_embeds_json_payload() {
        let tool_result = into_tool_result(result_fixture());
        assert!(!tool_result.is_error.unwrap_or(false));
        let text = match &tool_result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.contains("\"classification\": \"PARTIAL_SUCCESS\""));
    }
}
