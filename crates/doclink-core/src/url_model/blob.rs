//! Container and blob name behind a resolved storage URL.

use serde::Serialize;

use super::sanitize::{sanitize_filename, FALLBACK_FILENAME};
use crate::error::ResolveError;

/// A document location in blob storage: `https://<host>/<container>/<blob_name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobLocation {
    pub container: String,
    pub blob_name: String,
}

impl BlobLocation {
    /// Splits a resolved URL into container and blob name.
    ///
    /// Scheme, host, query and fragment are dropped and the path is
    /// percent-decoded. Both parts must be non-empty.
    pub fn from_url(url: &str) -> Result<Self, ResolveError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ResolveError::InvalidDocumentPath(format!("{url}: {e}")))?;
        let path = parsed.path();
        let path = urlencoding::decode(path)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| path.to_string());

        let mut parts = path.trim_start_matches('/').splitn(2, '/');
        let container = parts.next().unwrap_or_default();
        let blob_name = parts.next().unwrap_or_default();
        if container.is_empty() || blob_name.is_empty() {
            return Err(ResolveError::InvalidDocumentPath(format!(
                "cannot extract container and blob path from '{path}'"
            )));
        }

        Ok(Self {
            container: container.to_string(),
            blob_name: blob_name.to_string(),
        })
    }

    /// Filename to offer the browser: the last segment of the blob name.
    pub fn filename(&self) -> String {
        let last = self
            .blob_name
            .rsplit('/')
            .find(|s| !s.is_empty())
            .unwrap_or_default();
        let name = sanitize_filename(last);
        if name.is_empty() {
            FALLBACK_FILENAME.to_string()
        } else {
            name
        }
    }
}
