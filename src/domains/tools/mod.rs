//! The callable tool surface.
//!
//! Everything an MCP client can call: library search and browsing, playlist
//! listing and lifecycle, and the two verified mutation tools that run the
//! playlist engine.
//!
//! ## Layout
//!
//! - `definitions/` - one file per tool, grouped into `library/` and
//!   `playlist/`
//! - `router.rs` - builds the rmcp `ToolRouter` used by stdio and tcp
//! - `registry.rs` - tool metadata plus dispatch for the HTTP transport
//! - `error.rs` - dispatch error types
//!
//! To add a tool: write its file under `definitions/`, export it from the
//! group's `mod.rs`, then register it in both `router.rs` and
//! `registry.rs`. Nothing in `core/server.rs` needs to change.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
