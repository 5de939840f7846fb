//! Read-only data the server exposes to MCP clients: a live snapshot of the
//! Plex server, a document explaining how to read mutation outcomes, and a
//! URI template for listing any playlist's items.
//!
//! ## Layout
//!
//! - `definitions/` - one file per resource, each implementing
//!   [`ResourceDefinition`]; the playlist items template lives here too
//! - `registry.rs` - the list of registered resources and templates
//! - `service.rs` - URI lookup and content resolution for `resources/read`
//!
//! New resources need a definitions file plus a registry entry; the service
//! picks them up from there.

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{DynamicResourceType, ResourceContent, ResourceEntry, ResourceService};
