//! `doclink probe <reference>` – HEAD request against the resolved link.

use anyhow::{Context, Result};
use doclink_core::probe;
use doclink_core::resolver::{DirectResolver, Resolver};
use doclink_core::ResolverConfig;

pub async fn run_probe(cfg: &ResolverConfig, reference: &str) -> Result<()> {
    let resolver = DirectResolver::new(cfg)?;
    let link = resolver.resolve(reference)?;
    let href = link.href.clone();
    let result = tokio::task::spawn_blocking(move || probe::probe(&href))
        .await
        .context("probe task panicked")??;
    println!(
        "{} {}",
        result.status,
        link.cleaned.as_deref().unwrap_or(&link.href)
    );
    if let Some(ct) = &result.headers.content_type {
        println!("  content-type:   {ct}");
    }
    if let Some(len) = result.headers.content_length {
        println!("  content-length: {len}");
    }
    if !result.is_success() {
        anyhow::bail!("document link answered HTTP {}", result.status);
    }
    Ok(())
}
