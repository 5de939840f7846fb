//! Library sections listing tool definition.

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

use crate::domains::tools::definitions::common::{error_result, success_result};
use crate::plex::client::PlexClient;

/// Parameters for the library listing tool. Takes nothing.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct BrowseLibrariesParams {}

/// Library sections tool - lists the server's libraries.
pub struct BrowseLibrariesTool;

impl BrowseLibrariesTool {
    /// Name this tool registers under.
    pub const NAME: &'static str = "browse_libraries";

    /// Description advertised to clients.
    pub const DESCRIPTION: &'static str = "List the Plex server's library sections with their ids and media kinds. Section ids are used by the other library tools.";

    /// Run the tool for an rmcp call.
    #[instrument(skip_all)]
    pub async fn execute(_params: &BrowseLibrariesParams, plex: &PlexClient) -> CallToolResult {
        info!("Listing library sections");

        let sections = match plex.sections().await {
            Ok(sections) => sections,
            Err(err) => return error_result(&format!("Failed to list libraries: {}", err)),
        };

        if sections.is_empty() {
            return success_result("The server has no library sections.".to_string());
        }

        let mut response = format!("{} library section(s):\n\n", sections.len());
        response.push_str("| ID | Title | Kind |\n");
        response.push_str("|----|-------|------|\n");
        for section in &sections {
            response.push_str(&format!(
                "| {} | {} | {} |\n",
                section.key, section.title, section.section_type
            ));
        }
        success_result(response)
    }

    /// Entry point used by the HTTP transport.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        plex: Arc<PlexClient>,
    ) -> Result<serde_json::Value, String> {
        let params: BrowseLibrariesParams =
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
            input_schema: cached_schema_for_type::<BrowseLibrariesParams>(),
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
                let params: BrowseLibrariesParams =
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
    fn test_params_accept_empty_object() {
        let params: BrowseLibrariesParams = serde_json::from_value(serde_json::json!({})).unwrap();
        let _ = params;
    }
}
