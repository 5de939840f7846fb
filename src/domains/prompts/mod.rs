//! Guided workflows for the playlist and library tools: curating a themed
//! playlist, deduplicating without losing wanted copies, and surveying the
//! library. Each prompt walks the client through a tool sequence and tells
//! it how to read the mutation reports it will get back.
//!
//! ## Layout
//!
//! - `definitions/` - one file per prompt, each implementing
//!   [`PromptDefinition`]
//! - `registry.rs` - the list of registered prompts
//! - `service.rs` - argument validation and rendering for `prompts/get`
//! - `templates.rs` - the `{{var}}` / `{{#if}}` renderer
//!
//! New prompts need a definitions file plus a registry entry; the service
//! picks them up from there.

pub mod definitions;
mod error;
mod registry;
mod service;
pub mod templates;

pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use registry::{get_all_prompts, prompt_names};
pub use service::PromptService;
pub use templates::PromptTemplate;
