//! Plex MCP Server
//!
//! An MCP (Model Context Protocol) server that fronts a Plex Media Server:
//! library search and browsing, playlist management, and verified playlist
//! writes that report what actually changed instead of what was requested.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - **core**: Configuration, error handling, transports, and the MCP server glue
//! - **plex**: HTTP client for the Plex Media Server API
//! - **playlist**: Mutation engine that resolves, executes, verifies, and
//!   classifies playlist writes against the server's observed state
//! - **domains**: The MCP surface, organized by bounded contexts
//!   - **tools**: Callable tools (library search and browsing, playlist mutations)
//!   - **resources**: Readable resources (server snapshot, mutation semantics)
//!   - **prompts**: Guided workflows for common playlist tasks
//!
//! # Example
//!
//! ```rust,no_run
//! use plex_mcp_server::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Hand the server to a transport...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod playlist;
pub mod plex;

// Common entry points at the crate root
pub use crate::core::{Config, Error, McpServer, Result};
