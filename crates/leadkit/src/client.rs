//! Entry points for LeadKit
//!
//! Free functions for one-off scrapes. For repeated scrapes or a custom
//! fetcher, build a [`LeadScraper`](crate::LeadScraper) once and reuse it.

use crate::error::LeadError;
use crate::pipeline::LeadScraper;
use crate::types::LeadRecord;
use crate::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use std::time::Duration;

/// Fetch options shared by the HTTP fetcher and the scraper builder
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Custom User-Agent (defaults to [`DEFAULT_USER_AGENT`])
    pub user_agent: Option<String>,
    /// Bound on the whole request, connect included
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchOptions {
    /// User-Agent to send
    pub fn effective_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

/// Scrape a URL with default options
///
/// For custom options, use [`scrape_with_options`].
pub async fn scrape(url: &str) -> Result<LeadRecord, LeadError> {
    scrape_with_options(url, FetchOptions::default()).await
}

/// Scrape a URL with custom options
pub async fn scrape_with_options(
    url: &str,
    options: FetchOptions,
) -> Result<LeadRecord, LeadError> {
    // Validate URL early, before building a client
    if url.trim().is_empty() {
        return Err(LeadError::MissingUrl);
    }

    let scraper = LeadScraper::builder()
        .options(options)
        .build()
        .map_err(LeadError::Fetch)?;
    scraper.scrape(url).await
}
