//! CLI command handlers, one file per concern.

mod blob_path;
mod decode;
mod links;
mod probe;
mod resolve;
mod token;

pub use blob_path::run_blob_path;
pub use decode::{run_clean, run_decode};
pub use links::run_links;
pub use probe::run_probe;
pub use resolve::run_resolve;
pub use token::{run_append_token, run_sanitize_token};
