//! Failure taxonomy for link resolution.

use thiserror::Error;

/// Why a reference could not be turned into a document link.
///
/// Every variant is converted into a failed `LinkResolutionResult` at the
/// resolver boundary; none of them reach rendering code as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Empty or missing reference.
    #[error("No Base64 URL provided")]
    NoReference,
    /// Decoding produced something, but no recognizable document URL.
    #[error("Could not extract a document URL from the reference")]
    ExtractionFailed { raw: Option<String> },
    /// Unexpected failure inside the decode, clean, or token pipeline.
    #[error("Failed to build document link: {0}")]
    Decode(String),
    /// The resolved URL does not name a container and a blob.
    #[error("Invalid document URL format: {0}")]
    InvalidDocumentPath(String),
}
