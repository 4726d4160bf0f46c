//! Errors raised at the fetch/extraction boundary
//!
//! Analysis itself cannot fail; every string has a segmentation and a tier.

/// Terminal failures surfaced to the caller; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidInput { url: String, reason: String },

    #[error("failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error(
        "extracted content is too short ({length} chars); the site may block automated access or have no substantive text"
    )]
    ExtractionBlocked { length: usize },
}
