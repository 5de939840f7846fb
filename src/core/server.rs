//! The MCP server handler.
//!
//! Deliberately thin: the Plex configuration is validated once at
//! construction, then every protocol message is delegated to a domain
//! service. All tool behavior lives in `domains/tools/definitions/` (one
//! file per tool, wired up by `domains/tools/router.rs`), so adding a tool
//! never touches this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    prompts::PromptService,
    resources::{ResourceError, ResourceService},
    tools::build_tool_router,
};
use crate::plex::client::PlexClient;

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Protocol entry point shared by every transport.
///
/// Implements rmcp's `ServerHandler` and fans protocol messages out to the
/// domain services. Cloning is cheap; every transport connection gets its
/// own handle onto the same shared services.
#[derive(Clone)]
pub struct McpServer {
    /// Runtime configuration, shared across clones.
    config: Arc<Config>,

    /// Shared client for the Plex Media Server.
    plex: Arc<PlexClient>,

    /// Resource listing and reads.
    resource_service: Arc<ResourceService>,

    /// Prompt listing and rendering.
    prompt_service: Arc<PromptService>,

    /// Routes tool calls to their definitions.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Build the server from a loaded configuration.
    ///
    /// Fails when the configured Plex base URL cannot be parsed or the
    /// HTTP client cannot be constructed.
    pub fn new(config: Config) -> crate::core::error::Result<Self> {
        let config = Arc::new(config);
        let plex = Arc::new(PlexClient::new(&config.plex)?);

        let resource_service = Arc::new(ResourceService::new(plex.clone()));
        let prompt_service = Arc::new(PromptService::new());

        Ok(Self {
            tool_router: build_tool_router::<Self>(config.clone(), plex.clone()),
            config,
            plex,
            resource_service,
            prompt_service,
        })
    }

    /// Server name as reported during initialization.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Server version as reported during initialization.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // Plain-JSON views for the HTTP transport
    // ========================================================================

    /// Tool metadata as plain JSON.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Dispatch a tool call for the HTTP transport.
    ///
    /// Goes through the `ToolRegistry` rather than the rmcp router; each
    /// tool's `http_handler` lives next to the tool itself under
    /// `domains/tools/definitions/`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, crate::domains::tools::ToolError> {
        let registry = ToolRegistry::new(self.config.clone(), self.plex.clone());
        registry.call_tool(name, arguments).await
    }

    /// Resource metadata as plain JSON.
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI, flattening errors to strings.
    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Resource template metadata as plain JSON.
    pub async fn list_resource_templates(&self) -> Vec<serde_json::Value> {
        let templates = self.resource_service.list_resource_templates().await;

        templates
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }

    /// Prompt metadata as plain JSON.
    pub async fn list_prompts(&self) -> Vec<serde_json::Value> {
        let prompts = self.prompt_service.list_prompts().await;

        prompts
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments
                })
            })
            .collect()
    }

    /// Render a prompt, flattening errors to strings.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, String> {
        // The prompt service wants string-to-string arguments
        let args = arguments.and_then(|v| {
            v.as_object().map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
        });

        match self.prompt_service.get_prompt(name, args).await {
            Ok(result) => Ok(serde_json::json!({
                "description": result.description,
                "messages": result.messages
            })),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Protocol entry points. `#[tool_handler]` generates list_tools/call_tool
/// from the router; the rest delegate to the services.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "MCP server for a Plex Media Server: search and browse the library, \
                 and manage playlists. Playlist writes are verified against the \
                 server; add_to_playlist and remove_from_playlist return classified \
                 outcomes with before/after counts instead of bare acknowledgements. \
                 Read plex://server/mutation-semantics for how to interpret them."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("resources/list");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("resources/templates/list");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("resources/read {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| match &e {
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                _ => McpError::internal_error(e.to_string(), None),
            })
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("prompts/list");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("prompts/get {}", request.name);
        // The prompt service wants string-to-string arguments
        let arguments = request.arguments.map(|map| {
            map.into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect()
        });
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_construction() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "plex-mcp-server");
        assert!(!server.version().is_empty());
    }

    #[test]
    fn test_server_rejects_bad_base_url() {
        let mut config = Config::default();
        config.plex.base_url = "not a url".to_string();
        assert!(McpServer::new(config).is_err());
    }

    #[test]
    fn test_list_tools_includes_mutation_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 12);

        let names: Vec<_> = tools
            .iter()
            .filter_map(|t| t.get("name").and_then(|n| n.as_str()))
            .collect();
        assert!(names.contains(&"add_to_playlist"));
        assert!(names.contains(&"remove_from_playlist"));
    }
}
