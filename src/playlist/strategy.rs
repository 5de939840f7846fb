//! Write strategy selection.

use serde::Serialize;

/// How the executor issues write calls for an add.
///
/// Plex tolerates a single write fine, but bursts of near-simultaneous
/// playlist PUTs are exactly what makes its item listing lag, so multi-item
/// adds go out one call at a time with a pause in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationStrategy {
    /// One item, one call, no pacing.
    Direct,
    /// One call per item, paced, continuing past failures.
    Sequential,
}

impl MutationStrategy {
    /// Selects purely on item count.
    pub fn select(item_count: usize) -> Self {
        if item_count > 1 {
            Self::Sequential
        } else {
            Self::Direct
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Sequential => "sequential",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_item_is_direct() {
        assert_eq!(MutationStrategy::select(1), MutationStrategy::Direct);
    }

    #[test]
    fn test_multiple_items_are_sequential() {
        assert_eq!(MutationStrategy::select(2), MutationStrategy::Sequential);
        assert_eq!(MutationStrategy::select(40), MutationStrategy::Sequential);
    }

    #[test]
    fn test_empty_request_defaults_to_direct() {
        assert_eq!(MutationStrategy::select(0), MutationStrategy::Direct);
    }
}
