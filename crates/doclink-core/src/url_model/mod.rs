//! URL recovery from decoded references, plus the path and filename helpers
//! used when serving the document behind a reference.

mod blob;
mod content_disposition;
mod extract;
mod sanitize;

pub use blob::BlobLocation;
pub use content_disposition::{content_disposition, Disposition};
pub use extract::{UrlExtractor, DEFAULT_EXTENSIONS};
pub use sanitize::sanitize_filename;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::decode::{reinterpret_utf8, TolerantDecoder};
use crate::logging::Category;

/// Output of [`UrlCleaner::clean`]: the untruncated decode (for diagnostics)
/// and the recovered URL, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanedUrl {
    pub raw: Option<String>,
    pub cleaned: Option<String>,
}

/// Decoder and extractor pair turning an encoded reference into a URL.
#[derive(Debug, Clone, Default)]
pub struct UrlCleaner {
    decoder: TolerantDecoder,
    extractor: UrlExtractor,
}

impl UrlCleaner {
    pub fn new(decoder: TolerantDecoder, extractor: UrlExtractor) -> Self {
        Self { decoder, extractor }
    }

    pub fn clean(&self, encoded: &str) -> CleanedUrl {
        if encoded.is_empty() {
            return CleanedUrl::default();
        }

        let mut decoded = self.decoder.decode(encoded);
        if !contains_http(&decoded) && encoded.chars().count() > 1 {
            let shorter = drop_last_char(encoded);
            let retry = self.decoder.decode(shorter);
            if contains_http(&retry) {
                tracing::debug!(
                    target: "doclink::clean",
                    category = Category::Clean.as_str(),
                    "reference decoded after dropping one trailing character"
                );
                decoded = retry;
            }
        }

        let text = reinterpret_utf8(&decoded);
        let cleaned = self.extractor.extract(&text).map(str::to_string);
        if cleaned.is_none() {
            tracing::debug!(
                target: "doclink::clean",
                category = Category::Clean.as_str(),
                decoded_len = text.len(),
                "no document URL in decoded reference"
            );
        }

        CleanedUrl {
            raw: Some(text),
            cleaned,
        }
    }
}

static DEFAULT_CLEANER: Lazy<UrlCleaner> = Lazy::new(UrlCleaner::default);

/// Decodes `encoded` and extracts the document URL with default settings.
pub fn decode_and_clean_url(encoded: &str) -> CleanedUrl {
    DEFAULT_CLEANER.clean(encoded)
}

fn contains_http(s: &str) -> bool {
    s.to_ascii_lowercase().contains("http")
}

fn drop_last_char(s: &str) -> &str {
    match s.char_indices().last() {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::TrimPolicy;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    #[test]
    fn empty_reference_yields_nothing() {
        assert_eq!(decode_and_clean_url(""), CleanedUrl::default());
    }

    #[test]
    fn clean_reference_round_trips() {
        let url = "https://example.com/files/document.pdf";
        let r = decode_and_clean_url(&STANDARD.encode(url));
        assert_eq!(r.cleaned.as_deref(), Some(url));
        assert_eq!(r.raw.as_deref(), Some(url));
    }

    #[test]
    fn trailing_percent_in_payload_is_cut() {
        let r = decode_and_clean_url(&STANDARD.encode("https://example.com/files/document.pdf%"));
        assert_eq!(r.cleaned.as_deref(), Some("https://example.com/files/document.pdf"));
        assert_eq!(r.raw.as_deref(), Some("https://example.com/files/document.pdf%"));
    }

    #[test]
    fn utf8_path_is_restored() {
        let url = "https://example.com/docs/résumé.pdf";
        let r = decode_and_clean_url(&STANDARD.encode(url));
        assert_eq!(r.cleaned.as_deref(), Some(url));
    }

    #[test]
    fn stray_trailing_digit_is_tolerated() {
        let url = "https://store.blob.core.windows.net/docs/Policy Handbook.pdf";
        let r = decode_and_clean_url(&format!("{}5", STANDARD.encode(url)));
        assert_eq!(r.cleaned.as_deref(), Some(url));
    }

    #[test]
    fn line_break_after_extension_is_cut() {
        let r = decode_and_clean_url(&STANDARD.encode("https://a.com/x.pdf\nzz.txt"));
        assert_eq!(r.cleaned.as_deref(), Some("https://a.com/x.pdf"));
        assert_eq!(r.raw.as_deref(), Some("https://a.com/x.pdf\nzz.txt"));
    }

    #[test]
    fn cleaner_retries_without_last_char_when_no_http() {
        let cleaner = UrlCleaner::new(
            TolerantDecoder::new(TrimPolicy::new(0)),
            UrlExtractor::default(),
        );
        let url = "https://x.com/a.pdf";
        let r = cleaner.clean(&format!("{}A", STANDARD.encode(url)));
        assert_eq!(r.cleaned.as_deref(), Some(url));
        assert_eq!(r.raw.as_deref(), Some(url));
    }

    #[test]
    fn non_url_payload_has_raw_but_no_cleaned() {
        let r = decode_and_clean_url(&STANDARD.encode("just some text"));
        assert_eq!(r.raw.as_deref(), Some("just some text"));
        assert!(r.cleaned.is_none());
    }

    #[test]
    fn custom_extensions_flow_through_cleaner() {
        let cleaner = UrlCleaner::new(
            TolerantDecoder::default(),
            UrlExtractor::new(&["docx"]).unwrap(),
        );
        let r = cleaner.clean(&STANDARD.encode("https://example.com/a.docx"));
        assert_eq!(r.cleaned.as_deref(), Some("https://example.com/a.docx"));
        let r = cleaner.clean(&STANDARD.encode("https://example.com/a.pdf"));
        assert!(r.cleaned.is_none());
    }
}
