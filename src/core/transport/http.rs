//! The HTTP transport.
//!
//! A thin JSON-RPC 2.0 bridge over POST so curl and browser-based clients
//! can reach the server without speaking stdio framing. The bridge holds no
//! per-client state; every request is dispatched against the shared
//! [`McpServer`] and answered in one round trip.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 error codes used by this bridge.
mod rpc_code {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
}

/// Serves the JSON-RPC bridge.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Incoming JSON-RPC envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// Outgoing JSON-RPC envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    fn reply(id: Option<serde_json::Value>, body: Result<serde_json::Value, JsonRpcError>) -> Self {
        let (result, error) = match body {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(err)),
        };
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
            error,
        }
    }

    /// Successful response carrying `result`.
    pub fn ok(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self::reply(id, Ok(result))
    }

    /// Error response with the given JSON-RPC code.
    pub fn fail(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self::reply(
            id,
            Err(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        )
    }

    fn bad_params(id: Option<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::fail(id, rpc_code::INVALID_PARAMS, message)
    }
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// host:port string this transport binds.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind and serve until the process is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health))
            .route("/", get(describe))
            .with_state(server);

        if self.config.enable_cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Serving JSON-RPC on http://{}{} (CORS {}), health on /health",
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "open" } else { "off" }
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// GET / - short self-description for anyone poking the port.
async fn describe() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Plex MCP Server",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "JSON-RPC 2.0 over POST /mcp",
        "health": "GET /health",
    }))
}

/// GET /health - liveness probe.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// POST handler for the JSON-RPC endpoint.
#[instrument(skip_all, fields(method = %request.method))]
async fn handle_rpc(
    State(server): State<McpServer>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    info!("JSON-RPC request: {}", request.method);
    (StatusCode::OK, Json(process_request(&server, request).await))
}

/// Dispatch one JSON-RPC request against the server.
async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != JSONRPC_VERSION {
        return JsonRpcResponse::fail(request.id, rpc_code::INVALID_REQUEST, "Invalid Request");
    }

    let id = request.id;
    match request.method.as_str() {
        "initialize" => initialize(server, id),
        "tools/list" => {
            JsonRpcResponse::ok(id, serde_json::json!({ "tools": server.list_tools() }))
        }
        "tools/call" => call_tool(server, id, request.params).await,
        "resources/list" => {
            let resources = server.list_resources().await;
            JsonRpcResponse::ok(id, serde_json::json!({ "resources": resources }))
        }
        "resources/templates/list" => {
            let templates = server.list_resource_templates().await;
            JsonRpcResponse::ok(id, serde_json::json!({ "resourceTemplates": templates }))
        }
        "resources/read" => read_resource(server, id, request.params).await,
        "prompts/list" => {
            let prompts = server.list_prompts().await;
            JsonRpcResponse::ok(id, serde_json::json!({ "prompts": prompts }))
        }
        "prompts/get" => get_prompt(server, id, request.params).await,
        // Notifications carry no reply payload; ack so the client moves on.
        method if method.starts_with("notifications/") => {
            info!("Notification: {}", method);
            JsonRpcResponse::ok(id, serde_json::Value::Null)
        }
        other => {
            warn!("Unknown method: {}", other);
            JsonRpcResponse::fail(id, rpc_code::METHOD_NOT_FOUND, "Method not found")
        }
    }
}

/// Pull a required string field out of request params.
fn required_str(params: &serde_json::Value, field: &str) -> Option<String> {
    params
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn initialize(server: &McpServer, id: Option<serde_json::Value>) -> JsonRpcResponse {
    JsonRpcResponse::ok(
        id,
        serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {},
                "resources": {},
                "prompts": {}
            },
            "serverInfo": {
                "name": server.name(),
                "version": server.version()
            },
            "instructions": "MCP server for a Plex Media Server: search and browse the library, and manage playlists. Playlist writes are verified against the server; add_to_playlist and remove_from_playlist return classified outcomes with before/after counts instead of bare acknowledgements. Read plex://server/mutation-semantics for how to interpret them."
        }),
    )
}

async fn call_tool(
    server: &McpServer,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let Some(params) = params else {
        return JsonRpcResponse::bad_params(id, "Missing params");
    };
    let Some(name) = required_str(&params, "name") else {
        return JsonRpcResponse::bad_params(id, "Missing tool name");
    };
    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    match server.call_tool(&name, arguments).await {
        Ok(result) => JsonRpcResponse::ok(id, result),
        Err(e) => JsonRpcResponse::bad_params(id, e.to_string()),
    }
}

async fn read_resource(
    server: &McpServer,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let Some(params) = params else {
        return JsonRpcResponse::bad_params(id, "Missing params");
    };
    let Some(uri) = required_str(&params, "uri") else {
        return JsonRpcResponse::bad_params(id, "Missing resource URI");
    };

    match server.read_resource(&uri).await {
        Ok(result) => JsonRpcResponse::ok(id, result),
        Err(e) => JsonRpcResponse::bad_params(id, e),
    }
}

async fn get_prompt(
    server: &McpServer,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let Some(params) = params else {
        return JsonRpcResponse::bad_params(id, "Missing params");
    };
    let Some(name) = required_str(&params, "name") else {
        return JsonRpcResponse::bad_params(id, "Missing prompt name");
    };

    match server.get_prompt(&name, params.get("arguments").cloned()).await {
        Ok(result) => JsonRpcResponse::ok(id, result),
        Err(e) => JsonRpcResponse::bad_params(id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    fn test_server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    fn rpc(method: &str, params: Option<serde_json::Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(serde_json::json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_rejects_wrong_jsonrpc_version() {
        let server = test_server();
        let mut request = rpc("initialize", None);
        request.jsonrpc = "1.0".to_string();

        let response = process_request(&server, request).await;
        assert_eq!(response.error.unwrap().code, rpc_code::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_method_not_found() {
        let server = test_server();
        let response = process_request(&server, rpc("tools/destroy", None)).await;
        assert_eq!(response.error.unwrap().code, rpc_code::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notification_acks_with_null() {
        let server = test_server();
        let response =
            process_request(&server, rpc("notifications/initialized", None)).await;
        assert!(response.error.is_none());
        assert_eq!(response.result, Some(serde_json::Value::Null));
    }

    #[tokio::test]
    async fn test_initialize_reports_server_identity() {
        let server = test_server();
        let response =
            process_request(&server, rpc("initialize", Some(serde_json::json!({})))).await;

        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "plex-mcp-server");
        assert!(
            result["instructions"]
                .as_str()
                .unwrap()
                .contains("mutation-semantics")
        );
    }

    #[tokio::test]
    async fn test_tools_list_includes_playlist_mutations() {
        let server = test_server();
        let response = process_request(&server, rpc("tools/list", None)).await;

        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 12);

        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert!(names.contains(&"add_to_playlist"));
        assert!(names.contains(&"remove_from_playlist"));
    }

    #[tokio::test]
    async fn test_tools_call_requires_name() {
        let server = test_server();
        let response =
            process_request(&server, rpc("tools/call", Some(serde_json::json!({})))).await;
        assert_eq!(response.error.unwrap().code, rpc_code::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_read_static_resource() {
        let server = test_server();
        let params = serde_json::json!({ "uri": "plex://server/mutation-semantics" });
        let response = process_request(&server, rpc("resources/read", Some(params))).await;

        let result = response.result.unwrap();
        let text = result["contents"][0]["text"].as_str().unwrap();
        assert!(text.contains("FULL_SUCCESS"));
    }
}
