//! Resolvers turning citation references into document links.
//!
//! Two variants exist: [`DirectResolver`] decodes the reference locally and
//! appends the configured access token; [`ProxyResolver`] leaves decoding to
//! the server and only builds `/api/view/<ref>` and `/api/download/<ref>`
//! paths. The proxied variant keeps the token off the client and is the
//! preferred one when a backend is available.

use anyhow::Result;
use serde::Serialize;

use crate::decode::{TolerantDecoder, TrimPolicy};
use crate::error::ResolveError;
use crate::html::{self, Diagnostics};
use crate::logging::Category;
use crate::probe;
use crate::token::AccessToken;
use crate::url_model::{CleanedUrl, UrlCleaner, UrlExtractor, DEFAULT_EXTENSIONS};

/// Settings a resolver is built from. Replaces page-global configuration;
/// its lifetime is that of the hosting session.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub access_token: AccessToken,
    pub extensions: Vec<String>,
    pub trim_policy: TrimPolicy,
    pub view_prefix: String,
    pub download_prefix: String,
    pub show_diagnostics: bool,
    pub probe_after_resolve: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            access_token: AccessToken::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            trim_policy: TrimPolicy::default(),
            view_prefix: "/api/view".to_string(),
            download_prefix: "/api/download".to_string(),
            show_diagnostics: false,
            probe_after_resolve: false,
        }
    }
}

/// A link produced by a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    /// Value for the `href` attribute.
    pub href: String,
    /// URL recovered from the reference (direct variant only).
    pub cleaned: Option<String>,
    /// Untruncated decode of the reference (direct variant only).
    pub raw: Option<String>,
}

/// Trait implemented by the direct and proxied resolvers.
pub trait Resolver {
    fn resolve(&self, reference: &str) -> Result<ResolvedLink, ResolveError>;
}

/// Client-side resolution: decode, clean, and append the access token.
#[derive(Debug, Clone)]
pub struct DirectResolver {
    cleaner: UrlCleaner,
    token: AccessToken,
}

impl DirectResolver {
    pub fn new(cfg: &ResolverConfig) -> Result<Self> {
        let extractor = UrlExtractor::new(&cfg.extensions)?;
        Ok(Self {
            cleaner: UrlCleaner::new(TolerantDecoder::new(cfg.trim_policy), extractor),
            token: cfg.access_token.clone(),
        })
    }

    /// Decode and clean without attaching the token.
    pub fn clean(&self, reference: &str) -> CleanedUrl {
        self.cleaner.clean(reference)
    }
}

impl Resolver for DirectResolver {
    fn resolve(&self, reference: &str) -> Result<ResolvedLink, ResolveError> {
        if reference.trim().is_empty() {
            return Err(ResolveError::NoReference);
        }
        let CleanedUrl { raw, cleaned } = self.cleaner.clean(reference);
        let cleaned = cleaned.ok_or_else(|| ResolveError::ExtractionFailed { raw: raw.clone() })?;

        if self.token.is_empty() {
            tracing::debug!(
                target: "doclink::token",
                category = Category::Token.as_str(),
                "no access token configured; linking without credentials"
            );
        }
        let href = self.token.append_to(&cleaned);
        url::Url::parse(&href).map_err(|e| ResolveError::Decode(e.to_string()))?;

        Ok(ResolvedLink {
            href,
            cleaned: Some(cleaned),
            raw,
        })
    }
}

/// View and download paths served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyLinks {
    pub view: String,
    pub download: String,
}

/// Server-side resolution: the reference travels untouched to the backend.
#[derive(Debug, Clone)]
pub struct ProxyResolver {
    view_prefix: String,
    download_prefix: String,
}

impl ProxyResolver {
    pub fn new(cfg: &ResolverConfig) -> Self {
        Self {
            view_prefix: cfg.view_prefix.clone(),
            download_prefix: cfg.download_prefix.clone(),
        }
    }

    pub fn links(&self, reference: &str) -> Result<ProxyLinks, ResolveError> {
        if reference.trim().is_empty() {
            return Err(ResolveError::NoReference);
        }
        Ok(ProxyLinks {
            view: join_segment(&self.view_prefix, reference),
            download: join_segment(&self.download_prefix, reference),
        })
    }
}

impl Resolver for ProxyResolver {
    fn resolve(&self, reference: &str) -> Result<ResolvedLink, ResolveError> {
        let links = self.links(reference)?;
        Ok(ResolvedLink {
            href: links.view,
            cleaned: None,
            raw: None,
        })
    }
}

/// `prefix/<reference>`; `+`, `/` and `=` in the reference are percent-encoded
/// so it stays one path segment.
fn join_segment(prefix: &str, reference: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        urlencoding::encode(reference)
    )
}

/// Output contract of link creation. Created once, rendered or discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResolutionResult {
    pub raw_decoded: Option<String>,
    pub cleaned_url: Option<String>,
    pub success: bool,
    pub error: Option<String>,
    pub href: Option<String>,
    pub html: String,
}

impl LinkResolutionResult {
    fn failure(err: &ResolveError, cleaned: CleanedUrl, notice: String) -> Self {
        Self {
            raw_decoded: cleaned.raw,
            cleaned_url: cleaned.cleaned,
            success: false,
            error: Some(err.to_string()),
            href: None,
            html: notice,
        }
    }
}

/// Link creation for one page/session: both resolvers plus rendering.
#[derive(Debug, Clone)]
pub struct LinkService {
    direct: DirectResolver,
    proxy: ProxyResolver,
    show_diagnostics: bool,
    probe_after_resolve: bool,
}

impl LinkService {
    pub fn new(cfg: &ResolverConfig) -> Result<Self> {
        Ok(Self {
            direct: DirectResolver::new(cfg)?,
            proxy: ProxyResolver::new(cfg),
            show_diagnostics: cfg.show_diagnostics,
            probe_after_resolve: cfg.probe_after_resolve,
        })
    }

    pub fn direct(&self) -> &DirectResolver {
        &self.direct
    }

    pub fn proxy(&self) -> &ProxyResolver {
        &self.proxy
    }

    /// Whether failure notices include technical details by default.
    pub fn show_diagnostics(&self) -> bool {
        self.show_diagnostics
    }

    /// Resolves `reference` with the token-appending resolver and renders
    /// the result. Never fails; errors become `success: false`.
    pub fn create_download_link(&self, reference: &str, show_diagnostics: bool) -> LinkResolutionResult {
        match self.direct.resolve(reference) {
            Ok(link) => {
                if self.probe_after_resolve {
                    probe::spawn_probe(link.href.clone());
                }
                let label = document_label(link.cleaned.as_deref().unwrap_or(&link.href));
                LinkResolutionResult {
                    raw_decoded: link.raw,
                    cleaned_url: link.cleaned,
                    success: true,
                    error: None,
                    html: html::render_link(&link.href, &label),
                    href: Some(link.href),
                }
            }
            Err(err) => self.failure(reference, err, show_diagnostics),
        }
    }

    /// Renders view/download actions through the backend endpoints.
    pub fn proxy_links(&self, reference: &str, title: &str, show_diagnostics: bool) -> LinkResolutionResult {
        self.render_proxy_links(reference, self.proxy.links(reference), title, show_diagnostics)
    }

    /// Renders an already computed [`ProxyResolver::links`] outcome.
    pub fn render_proxy_links(
        &self,
        reference: &str,
        links: Result<ProxyLinks, ResolveError>,
        title: &str,
        show_diagnostics: bool,
    ) -> LinkResolutionResult {
        match links {
            Ok(links) => LinkResolutionResult {
                raw_decoded: None,
                cleaned_url: None,
                success: true,
                error: None,
                html: html::render_document_actions(&links.view, &links.download, title),
                href: Some(links.view),
            },
            Err(err) => self.failure(reference, err, show_diagnostics),
        }
    }

    fn failure(&self, reference: &str, err: ResolveError, show_diagnostics: bool) -> LinkResolutionResult {
        tracing::warn!(
            target: "doclink::render",
            category = Category::Render.as_str(),
            error = %err,
            reference_len = reference.len(),
            "could not produce document link"
        );
        let cleaned = match &err {
            ResolveError::NoReference => CleanedUrl::default(),
            ResolveError::ExtractionFailed { raw } => CleanedUrl {
                raw: raw.clone(),
                cleaned: None,
            },
            _ => self.direct.clean(reference),
        };
        let notice = if show_diagnostics {
            let d = Diagnostics {
                encoded: reference,
                raw: cleaned.raw.as_deref(),
                cleaned: cleaned.cleaned.as_deref(),
            };
            html::render_notice(&err.to_string(), Some(&d))
        } else {
            html::render_notice(&err.to_string(), None)
        };
        LinkResolutionResult::failure(&err, cleaned, notice)
    }
}

/// One-shot link creation from a configuration. Never fails.
pub fn create_download_link(
    cfg: &ResolverConfig,
    reference: &str,
    show_diagnostics: bool,
) -> LinkResolutionResult {
    match LinkService::new(cfg) {
        Ok(service) => service.create_download_link(reference, show_diagnostics),
        Err(e) => {
            let err = ResolveError::Decode(e.to_string());
            let notice = html::render_notice(&err.to_string(), None);
            LinkResolutionResult::failure(&err, CleanedUrl::default(), notice)
        }
    }
}

/// Human label for a link: the decoded last path segment.
fn document_label(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last = path.rsplit('/').find(|s| !s.is_empty()).unwrap_or_default();
    let decoded = urlencoding::decode(last)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| last.to_string());
    if decoded.is_empty() || decoded.contains(':') {
        "Open document".to_string()
    } else {
        decoded
    }
}
