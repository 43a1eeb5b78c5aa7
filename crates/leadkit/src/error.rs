//! Error types for LeadKit

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// URL has a scheme other than http or https
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client: {0}")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Failed to connect to server (DNS, refused, TLS)
    #[error("Failed to connect to server: {0}")]
    ConnectError(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{status} for url: {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    ///
    /// `timeout` is reported back when the error is a timeout so the
    /// message names the configured bound.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { timeout }
        } else if err.is_connect() {
            FetchError::ConnectError(err)
        } else {
            FetchError::RequestError(err.to_string())
        }
    }

    /// True for the timeout variant
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}

/// Errors raised by a lead store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A previous writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,

    /// A stored `created_at` value could not be parsed
    #[error("Invalid timestamp in store: {0}")]
    InvalidTimestamp(String),
}

/// Caller-facing errors for scraping and submitting leads
#[derive(Debug, Error)]
pub enum LeadError {
    /// Fetch failed; extraction never ran
    #[error("Error scraping website: {0}")]
    Fetch(#[from] FetchError),

    /// Programmatic submission without a url
    #[error("URL is required")]
    MissingUrl,

    /// Submission url could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Storage failure, propagated unmodified
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LeadError {
    /// True when the error was caused by bad caller input rather than the
    /// network or the store
    pub fn is_client_error(&self) -> bool {
        matches!(self, LeadError::MissingUrl | LeadError::InvalidUrl(_))
    }
}
