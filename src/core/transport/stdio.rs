//! The STDIO transport.
//!
//! The default MCP mode: protocol messages on stdin/stdout, logs on
//! stderr. There is exactly one client, the process that spawned us, and
//! the session lasts until it closes our stdin.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Serves one session over stdin/stdout.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve MCP over stdin/stdout until the client disconnects.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("{} ready on stdin/stdout", server.name());

        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::startup(e.to_string()))?;

        session
            .waiting()
            .await
            .map_err(|e| TransportError::session(e.to_string()))?;

        info!("stdin closed, shutting down");
        Ok(())
    }
}
