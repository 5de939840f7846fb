//! The TCP transport.
//!
//! Line-delimited JSON-RPC over a plain socket. Every accepted connection
//! becomes its own MCP session on a spawned task; the sessions share one
//! [`McpServer`] and through it one Plex client.

use std::net::SocketAddr;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Accept loop for socket sessions.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// host:port string this transport binds.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept connections until the process is shut down.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("{} listening on tcp://{}", server.name(), addr);

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("accept failed: {}", e);
                    // Back off so a persistent accept error cannot spin the loop
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                    continue;
                }
            };

            if let Err(e) = stream.set_nodelay(true) {
                warn!("could not set TCP_NODELAY for {}: {}", peer, e);
            }

            let session_server = server.clone();
            tokio::spawn(serve_client(session_server, stream, peer));
        }
    }
}

/// Serve one client connection to completion.
async fn serve_client(server: McpServer, stream: TcpStream, peer: SocketAddr) {
    let session = match server.serve(stream).await {
        Ok(session) => session,
        Err(e) => {
            warn!("handshake with {} failed: {}", peer, e);
            return;
        }
    };

    info!("{} connected", peer);
    match session.waiting().await {
        Ok(_) => info!("{} disconnected", peer),
        Err(e) => warn!("session with {} ended with error: {:?}", peer, e),
    }
}
