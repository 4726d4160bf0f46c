//! Remote document retrieval
//!
//! The only I/O in the crate. Requests are blocking, bounded by a timeout,
//! and never retried: every failure is returned to the caller as-is.

use crate::error::ScanError;
use crate::extract::extract_document;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Desktop browser identification; many sites refuse obvious bots
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Accept only absolute http(s) URLs
pub fn validate_url(raw: &str) -> Result<Url, ScanError> {
    let invalid = |reason: String| ScanError::InvalidInput {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!(
            "scheme must be http or https (got '{}')",
            other
        ))),
    }
}

/// GET the page and return its HTML
pub fn fetch_html(url: &Url, options: &FetchOptions) -> Result<String, ScanError> {
    let failed = |reason: String| ScanError::FetchFailed {
        url: url.to_string(),
        reason,
    };

    let client = Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .build()
        .map_err(|e| failed(format!("could not build HTTP client: {}", e)))?;

    debug!(%url, timeout_secs = options.timeout.as_secs(), "fetching document");
    let response = client.get(url.as_str()).send().map_err(|e| {
        if e.is_timeout() {
            failed(format!("timed out after {}s", options.timeout.as_secs()))
        } else {
            failed(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(failed(format!("server responded with {}", status)));
    }

    let body = response.text().map_err(|e| failed(e.to_string()))?;
    info!(%url, bytes = body.len(), "fetched document");
    Ok(body)
}

/// Validate, fetch and extract the filtered plain text of a page
pub fn fetch_document(raw_url: &str, options: &FetchOptions) -> Result<String, ScanError> {
    let url = validate_url(raw_url)?;
    let html = fetch_html(&url, options)?;
    extract_document(&html).inspect_err(|e| {
        warn!(%url, error = %e, "extraction blocked");
    })
}
