//! The MCP surface of the server, organized by bounded contexts.
//!
//! Each subdomain covers one side of the protocol: tools the client can
//! call, resources it can read, and prompts it can instantiate. All three
//! sit on top of the shared Plex client and playlist engine.

pub mod prompts;
pub mod resources;
pub mod tools;
