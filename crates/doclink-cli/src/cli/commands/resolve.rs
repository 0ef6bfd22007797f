//! `doclink resolve <reference>` – tokenized document link.

use anyhow::Result;
use doclink_core::{LinkService, ResolverConfig};

pub fn run_resolve(cfg: &ResolverConfig, reference: &str, diagnostics: bool, html: bool) -> Result<()> {
    let service = LinkService::new(cfg)?;
    let result =
        service.create_download_link(reference, diagnostics || service.show_diagnostics());
    if html {
        println!("{}", result.html);
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}
