//! Best-effort HEAD request against a resolved document link.
//!
//! Purely diagnostic: it reports whether the storage endpoint accepts the
//! link (status, type, size) and never changes what was rendered. Uses the
//! curl crate (libcurl).

mod parse;

use anyhow::{Context, Result};
use serde::Serialize;
use std::str;
use std::thread;
use std::time::Duration;

use crate::logging::Category;

/// Headers of interest from the final response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeHeaders {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub content_disposition: Option<String>,
}

/// Outcome of a HEAD probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// HTTP status of the final response (after redirects).
    pub status: u32,
    #[serde(flatten)]
    pub headers: ProbeHeaders,
}

impl ProbeResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a HEAD request and returns status and key headers.
///
/// Follows redirects. Non-2xx statuses are reported, not treated as errors.
/// Blocks the current thread; call from `spawn_blocking` in async code.
pub fn probe(url: &str) -> Result<ProbeResult> {
    let mut lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(Duration::from_secs(10))?;
    easy.timeout(Duration::from_secs(20))?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform().context("HEAD request failed")?;
    }

    let status = easy.response_code().context("no response code")?;
    Ok(ProbeResult {
        status,
        headers: parse::parse_headers(&lines),
    })
}

/// Fires [`probe`] on a background thread and logs the outcome.
///
/// Returns the handle so callers may wait; dropping it detaches the probe.
pub fn spawn_probe(url: String) -> Option<thread::JoinHandle<()>> {
    let spawned = thread::Builder::new()
        .name("doclink-probe".to_string())
        .spawn(move || {
            let target = without_query(&url);
            match probe(&url) {
                Ok(r) if r.is_success() => tracing::info!(
                    target: "doclink::probe",
                    category = Category::Probe.as_str(),
                    url = target,
                    status = r.status,
                    content_type = r.headers.content_type.as_deref().unwrap_or("-"),
                    "document link reachable"
                ),
                Ok(r) => tracing::warn!(
                    target: "doclink::probe",
                    category = Category::Probe.as_str(),
                    url = target,
                    status = r.status,
                    "document link answered with non-success status"
                ),
                Err(e) => tracing::warn!(
                    target: "doclink::probe",
                    category = Category::Probe.as_str(),
                    url = target,
                    error = %format!("{e:#}"),
                    "document link probe failed"
                ),
            }
        });
    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("could not start probe thread: {}", e);
            None
        }
    }
}

/// Strips the query so access tokens stay out of the logs.
fn without_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_not_logged() {
        assert_eq!(without_query("https://x/a.pdf?sig=secret"), "https://x/a.pdf");
        assert_eq!(without_query("https://x/a.pdf"), "https://x/a.pdf");
    }

    #[test]
    fn success_range() {
        let mut r = ProbeResult {
            status: 204,
            headers: ProbeHeaders::default(),
        };
        assert!(r.is_success());
        r.status = 403;
        assert!(!r.is_success());
    }
}
