//! On deck tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{
    default_limit, error_result, item_label, success_result, validate_limit,
};
use crate::plex::client::PlexClient;

/// Parameters for the on deck tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OnDeckParams {
    /// Maximum number of items to return (default: 10, max: 100).
    #[schemars(description = "Maximum number of items (default: 10, max: 100)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// On deck tool - items mid-watch, with progress.
pub struct OnDeckTool;

impl OnDeckTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "get_on_deck";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "List the items currently on deck (partially watched or next up), with viewing progress where available.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all)]
    pub async fn execute(params: &OnDeckParams, plex: &PlexClient) -> CallToolResult {
        info!("Fetching on deck items");

        let limit = validate_limit(params.limit);
        let items = match plex.on_deck(limit).await {
            Ok(items) => items,
            Err(err) => return error_result(&format!("Failed to fetch on deck: {}", err)),
        };

        if items.is_empty() {
            return success_result("Nothing is on deck.".to_string());
        }

        let lines: Vec<String> = items
            .iter()
            .take(limit as usize)
            .enumerate()
            .map(|(index, item)| {
                let progress = match (item.view_offset, item.duration) {
                    (Some(offset), Some(duration)) if duration > 0 => {
                        format!(", {}% watched", (offset * 100 / duration).min(100))
                    }
                    _ => String::new(),
                };
                format!(
                    "{}. {} (key: {}{})",
                    index + 1,
                    item_label(item),
                    item.rating_key,
                    progress
                )
            })
            .collect();

        success_result(format!(
            "{} item(s) on deck:\n\n{}",
            lines.len(),
            lines.join("\n")
        ))
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
    ) -> Result<serde_json::Value, String> {
        let params: OnDeckParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))?;

        let result = Self::execute(&params, &plex).await;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Tool metadata for tools/list.
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<OnDeckParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Route handed to the rmcp router for STDIO/TCP.
    pub fn create_route<S>(plex: Arc<PlexClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let plex = plex.clone();
            async move {
                let params: OnDeckParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &plex).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_defaults() {
        let params: OnDeckParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.limit, 10);
    }
}
