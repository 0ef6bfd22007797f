//! Locating the document URL inside a decoded reference.

use anyhow::{bail, Result};
use regex::Regex;

/// Extensions recognized when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["pdf", "txt", "csv"];

/// Finds `http(s)://...<.ext>` in decoded text and cuts anything after the
/// extension. The URL never spans a line break.
#[derive(Debug, Clone)]
pub struct UrlExtractor {
    pattern: Regex,
}

impl UrlExtractor {
    /// Builds an extractor for the given extensions (with or without the
    /// leading dot, any case).
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self> {
        let alternatives: Vec<String> = extensions
            .iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .map(|e| regex::escape(&e))
            .collect();
        if alternatives.is_empty() {
            bail!("no document extensions configured");
        }
        let pattern = Regex::new(&format!(
            r"(?i)https?://.*\.({})",
            alternatives.join("|")
        ))?;
        Ok(Self { pattern })
    }

    /// Returns the URL ending exactly at the recognized extension, or `None`
    /// when the text holds no such URL.
    pub fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let caps = self.pattern.captures(text)?;
        let whole = caps.get(0)?;
        let ext = caps.get(1)?;
        Some(&text[whole.start()..ext.end()])
    }
}

impl Default for UrlExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS).expect("default extensions form a valid pattern")
    }
}
