//! Mutation request model.

use serde::Serialize;

/// Direction of a playlist mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationOp {
    Add,
    Remove,
}

impl MutationOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl std::fmt::Display for MutationOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to change playlist membership.
///
/// `item_keys` are rating keys in caller order. The engine attempts every
/// key even when earlier ones fail.
#[derive(Debug, Clone)]
pub struct MutationRequest {
    pub playlist_id: String,
    pub op: MutationOp,
    pub item_keys: Vec<String>,
}

impl MutationRequest {
    pub fn add(playlist_id: impl Into<String>, item_keys: Vec<String>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            op: MutationOp::Add,
            item_keys,
        }
    }

    pub fn remove(playlist_id: impl Into<String>, item_keys: Vec<String>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            op: MutationOp::Remove,
            item_keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MutationOp::Add).unwrap(), "\"add\"");
        assert_eq!(
            serde_json::to_string(&MutationOp::Remove).unwrap(),
            "\"remove\""
        );
    }

    #[test]
    fn test_constructors_set_op() {
        let request = MutationRequest::add("10", vec!["1".to_string()]);
        assert_eq!(request.op, MutationOp::Add);
        assert_eq!(request.playlist_id, "10");

        let request = MutationRequest::remove("10", vec!["1".to_string()]);
        assert_eq!(request.op, MutationOp::Remove);
    }
}
