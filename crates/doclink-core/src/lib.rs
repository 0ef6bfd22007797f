//! Recovers source-document links from the Base64 references attached to
//! chat citations, and renders them as safe HTML.

pub mod config;
pub mod logging;

pub mod citation;
pub mod decode;
pub mod error;
pub mod html;
pub mod probe;
pub mod resolver;
pub mod token;
pub mod url_model;

pub use error::ResolveError;
pub use resolver::{create_download_link, LinkResolutionResult, LinkService, ResolverConfig};
