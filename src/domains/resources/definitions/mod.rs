//! One file per resource. Fixed-URI resources implement
//! [`ResourceDefinition`]; the playlist items template is the odd one out,
//! since its URI is a pattern rather than a constant.

use super::service::ResourceContent;

pub mod mutation_semantics;
pub mod playlist_items;
pub mod server_info;

pub use mutation_semantics::MutationSemanticsResource;
pub use playlist_items::PlaylistItemsResource;
pub use server_info::ServerInfoResource;

/// Metadata and content source for a fixed-URI resource.
pub trait ResourceDefinition {
    /// URI clients pass to resources/read.
    const URI: &'static str;

    /// Display name shown in resources/list.
    const NAME: &'static str;

    /// Short description shown in resources/list.
    const DESCRIPTION: &'static str;

    /// MIME type of the produced content.
    const MIME_TYPE: &'static str;

    /// How the content for this resource is produced.
    fn content() -> ResourceContent;
}
