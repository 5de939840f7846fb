//! Transport selection and startup.
//!
//! One entry point over however many transports were compiled in. The
//! variant picked at startup owns the process from `run` until shutdown.

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

/// Runs the MCP server on the transport chosen at startup.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Hand the server to the selected transport and block until it exits.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Selected transport: {}", self.config.description());

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => super::stdio::StdioTransport::run(server).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => super::tcp::TcpTransport::new(cfg).run(server).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => super::http::HttpTransport::new(cfg).run(server).await,
        }
    }
}
