//! Scrape pipeline: fetch → extract → (optionally) store

use crate::client::FetchOptions;
use crate::error::{FetchError, LeadError};
use crate::extract::extract;
use crate::fetchers::{Fetcher, HttpFetcher};
use crate::normalize::normalize_url;
use crate::store::LeadStore;
use crate::types::{LeadRecord, LeadSubmission};
use schemars::schema_for;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Builder for configuring a [`LeadScraper`]
#[derive(Default)]
pub struct LeadScraperBuilder {
    options: FetchOptions,
    fetcher: Option<Box<dyn Fetcher>>,
}

impl LeadScraperBuilder {
    /// Create a builder with default fetch options
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all fetch options at once
    pub fn options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = Some(ua.into());
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Use a custom fetcher instead of the HTTP one
    ///
    /// When set, `user_agent` and `timeout` are ignored.
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Build the scraper
    pub fn build(self) -> Result<LeadScraper, FetchError> {
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(HttpFetcher::new(&self.options)?),
        };
        Ok(LeadScraper { fetcher })
    }
}

/// Configured lead scraper
///
/// Holds no per-request state; one instance can serve concurrent scrapes.
pub struct LeadScraper {
    fetcher: Box<dyn Fetcher>,
}

impl std::fmt::Debug for LeadScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadScraper")
            .field("fetcher", &self.fetcher.name())
            .finish()
    }
}

impl LeadScraper {
    /// Create a new scraper builder
    pub fn builder() -> LeadScraperBuilder {
        LeadScraperBuilder::new()
    }

    /// Scraper with the default HTTP fetcher
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    /// Name of the fetcher in use
    pub fn fetcher_name(&self) -> &'static str {
        self.fetcher.name()
    }

    /// JSON schema of [`LeadSubmission`]
    ///
    /// `url` is listed as required even though the field is optional on the
    /// wire: [`LeadSubmission::into_record`] rejects a submission without it.
    pub fn input_schema() -> serde_json::Value {
        let mut value = serde_json::to_value(schema_for!(LeadSubmission)).unwrap_or_default();

        if let Some(schema) = value.as_object_mut() {
            let required = schema
                .entry("required")
                .or_insert_with(|| serde_json::Value::Array(Vec::new()));
            if let Some(required) = required.as_array_mut() {
                if !required.iter().any(|v| v == "url") {
                    required.push(serde_json::Value::from("url"));
                }
            }
        }

        value
    }

    /// JSON schema of [`LeadRecord`]
    pub fn output_schema() -> serde_json::Value {
        serde_json::to_value(schema_for!(LeadRecord)).unwrap_or_default()
    }

    /// Fetch `raw_url` and extract a lead from it
    ///
    /// A URL without a scheme gets `https://`. Fetch failures are returned
    /// as [`LeadError::Fetch`]; extraction itself cannot fail.
    pub async fn scrape(&self, raw_url: &str) -> Result<LeadRecord, LeadError> {
        let raw_url = raw_url.trim();
        if raw_url.is_empty() {
            return Err(LeadError::MissingUrl);
        }
        let url = normalize_url(raw_url)?;

        debug!(url = %url, fetcher = self.fetcher.name(), "Scraping");
        let page = self.fetcher.fetch(&url).await.map_err(|e| {
            warn!(url = %url, error = %e, "Fetch failed");
            LeadError::Fetch(e)
        })?;

        let lead = extract(&page.html, &page.url);
        info!(
            url = %lead.url,
            company = %lead.company,
            has_email = lead.email.is_some(),
            "Scraped lead"
        );
        Ok(lead)
    }

    /// Scrape `raw_url` and persist the result
    ///
    /// Nothing is written when the fetch fails.
    pub async fn scrape_and_store(
        &self,
        raw_url: &str,
        store: &dyn LeadStore,
    ) -> Result<(i64, LeadRecord), LeadError> {
        let lead = self.scrape(raw_url).await?;
        let id = store.insert(&lead)?;
        Ok((id, lead))
    }

    /// Validate a pre-built lead and persist it
    ///
    /// A submission without a url is rejected before the store is touched.
    pub fn submit(
        &self,
        submission: LeadSubmission,
        store: &dyn LeadStore,
    ) -> Result<(i64, LeadRecord), LeadError> {
        let lead = submission.into_record()?;
        let id = store.insert(&lead)?;
        Ok((id, lead))
    }
}
