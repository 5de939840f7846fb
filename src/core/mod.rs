//! Shared infrastructure: configuration, the unified error type, the MCP
//! server glue, and the transport layer it runs on.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
