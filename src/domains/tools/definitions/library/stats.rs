//! Library statistics tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::tools::definitions::common::{error_result, success_result};
use crate::plex::client::PlexClient;

/// Parameters for the library statistics tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct LibraryStatsParams {
    /// Restrict the report to one library section.
    #[schemars(description = "Optional library section id")]
    #[serde(default)]
    pub section_id: Option<String>,
}

/// Library statistics tool - item counts per section.
pub struct LibraryStatsTool;

impl LibraryStatsTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "get_library_stats";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "Report item counts for the server's library sections, or for a single section.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all)]
    pub async fn execute(params: &LibraryStatsParams, plex: &PlexClient) -> CallToolResult {
        info!("Collecting library statistics");

        let sections = match plex.sections().await {
            Ok(sections) => sections,
            Err(err) => return error_result(&format!("Failed to list libraries: {}", err)),
        };

        let selected: Vec<_> = match &params.section_id {
            Some(id) => sections.into_iter().filter(|s| &s.key == id).collect(),
            None => sections,
        };

        if selected.is_empty() {
            return match &params.section_id {
                Some(id) => error_result(&format!("No library section with id {}", id)),
                None => success_result("The server has no library sections.".to_string()),
            };
        }

        let mut response = String::from("| Section | Kind | Items |\n|---------|------|-------|\n");
        let mut grand_total: u64 = 0;
        for section in &selected {
            let count = match plex.section_total(&section.key).await {
                Ok(Some(total)) => {
                    grand_total += u64::from(total);
                    total.to_string()
                }
                Ok(None) => "?".to_string(),
                Err(err) => {
                    warn!("Count failed for section {}: {}", section.key, err);
                    "?".to_string()
                }
            };
            response.push_str(&format!(
                "| {} | {} | {} |\n",
                section.title, section.section_type, count
            ));
        }
        response.push_str(&format!("\nTotal items counted: {}", grand_total));

        success_result(response)
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
    ) -> Result<serde_json::Value, String> {
        let params: LibraryStatsParams =
            serde_json::from_value(arguments).unwrap_or_default();

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
            input_schema: cached_schema_for_type::<LibraryStatsParams>(),
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
                let params: LibraryStatsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &plex).await)
            }
            .boxed()
        })
    }
}
