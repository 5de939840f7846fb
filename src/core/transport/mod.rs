//! The transport layer.
//!
//! Three interchangeable ways to put the same server in front of a client,
//! each behind its own cargo feature:
//! - **STDIO** (`stdio`, default): stdin/stdout, the standard MCP mode
//! - **TCP** (`tcp`): newline-delimited JSON-RPC over a socket
//! - **HTTP** (`http`): JSON-RPC over POST, for curl and browser clients
//!
//! A transport owns connection lifecycles only; every protocol message ends
//! up in the same [`McpServer`](crate::core::McpServer) regardless of how
//! it arrived.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

#[cfg(feature = "tcp")]
pub mod tcp;

pub use config::TransportConfig;
#[cfg(feature = "http")]
pub use config::HttpConfig;
#[cfg(feature = "tcp")]
pub use config::TcpConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
