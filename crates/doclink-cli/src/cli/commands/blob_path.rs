//! `doclink blob-path <reference>` – container and blob behind a reference.

use anyhow::{Context, Result};
use doclink_core::resolver::DirectResolver;
use doclink_core::url_model::{content_disposition, BlobLocation, Disposition};
use doclink_core::ResolverConfig;

pub fn run_blob_path(cfg: &ResolverConfig, reference: &str) -> Result<()> {
    let resolver = DirectResolver::new(cfg)?;
    let url = resolver
        .clean(reference)
        .cleaned
        .context("no document URL found in reference")?;
    let location = BlobLocation::from_url(&url)?;
    let filename = location.filename();
    println!("container: {}", location.container);
    println!("blob:      {}", location.blob_name);
    println!(
        "view:      Content-Disposition: {}",
        content_disposition(&filename, Disposition::Inline)
    );
    println!(
        "download:  Content-Disposition: {}",
        content_disposition(&filename, Disposition::Attachment)
    );
    Ok(())
}
