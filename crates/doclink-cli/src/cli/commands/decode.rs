//! `doclink decode` and `doclink clean` – inspect the decoding steps.

use anyhow::{bail, Result};
use doclink_core::decode::TolerantDecoder;
use doclink_core::resolver::DirectResolver;
use doclink_core::ResolverConfig;

/// Print the tolerant decode of `reference` (before URL extraction).
pub fn run_decode(cfg: &ResolverConfig, reference: &str) {
    let decoder = TolerantDecoder::new(cfg.trim_policy);
    println!("{}", decoder.decode(reference));
}

/// Print the extracted document URL, or fail with the raw decode.
pub fn run_clean(cfg: &ResolverConfig, reference: &str) -> Result<()> {
    let resolver = DirectResolver::new(cfg)?;
    let result = resolver.clean(reference);
    match result.cleaned {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => bail!(
            "no document URL found (decoded: {:?})",
            result.raw.unwrap_or_default()
        ),
    }
}
