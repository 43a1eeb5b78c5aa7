//! HTTP fetcher
//!
//! Single GET with a browser-like User-Agent and a hard timeout. Any
//! transport failure or non-success status becomes a [`FetchError`].

use crate::client::FetchOptions;
use crate::error::FetchError;
use crate::fetchers::Fetcher;
use crate::types::FetchedPage;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP fetcher backed by a reusable reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher from options
    pub fn new(options: &FetchOptions) -> Result<Self, FetchError> {
        let user_agent = options.effective_user_agent();

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(crate::DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(options.timeout)
            .timeout(options.timeout)
            .build()
            .map_err(FetchError::ClientBuildError)?;

        Ok(Self {
            client,
            timeout: options.timeout,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        let resolved = response.url().clone();
        if !status.is_success() {
            warn!(url = %resolved, status = status.as_u16(), "Non-success status");
            return Err(FetchError::HttpStatus {
                status,
                url: resolved.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        debug!(url = %resolved, bytes = html.len(), "Fetched page");

        Ok(FetchedPage {
            url: resolved,
            status_code: status.as_u16(),
            content_type,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_builds_with_defaults() {
        let fetcher = HttpFetcher::new(&FetchOptions::default()).unwrap();
        assert_eq!(fetcher.name(), "http");
        assert_eq!(fetcher.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_user_agent_falls_back() {
        let options = FetchOptions {
            user_agent: Some("bad\nagent".to_string()),
            timeout: Duration::from_secs(3),
        };
        let fetcher = HttpFetcher::new(&options).unwrap();
        assert_eq!(fetcher.timeout, Duration::from_secs(3));
    }
}
