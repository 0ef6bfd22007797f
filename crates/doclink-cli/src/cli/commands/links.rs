//! `doclink links <reference>` – server-proxied view/download links.

use anyhow::Result;
use doclink_core::{LinkService, ResolverConfig};

pub fn run_links(cfg: &ResolverConfig, reference: &str, title: &str, html: bool) -> Result<()> {
    let service = LinkService::new(cfg)?;
    println!("{}", links_output(&service, reference, title, html));
    Ok(())
}

/// Plain view/download lines on success; the rendered HTML (or failure
/// notice) otherwise.
fn links_output(service: &LinkService, reference: &str, title: &str, html: bool) -> String {
    let links = service.proxy().links(reference);
    if let (Ok(l), false) = (&links, html) {
        return format!("view:     {}\ndownload: {}", l.view, l.download);
    }
    service
        .render_proxy_links(reference, links, title, service.show_diagnostics())
        .html
}
