//! Fetcher system for retrieving pages
//!
//! Design: the pipeline only talks to the [`Fetcher`] trait, so the HTTP
//! implementation can be swapped for a fake in tests.

mod http;

pub use http::HttpFetcher;

use crate::error::FetchError;
use crate::types::FetchedPage;
use async_trait::async_trait;
use url::Url;

/// Trait for page fetchers
///
/// A fetcher performs a single attempt for the given URL. Retries, if any,
/// belong to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Unique identifier for this fetcher (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Fetch the page at `url`
    ///
    /// Returns the body and the resolved URL on a success status, or a
    /// [`FetchError`] for transport failures and non-success statuses.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticFetcher;

    #[async_trait]
    impl Fetcher for StaticFetcher {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
            Ok(FetchedPage {
                url: url.clone(),
                status_code: 200,
                content_type: Some("text/html".to_string()),
                html: "<title>Static</title>".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_boxed_fetcher_delegates() {
        let fetcher: Box<dyn Fetcher> = Box::new(StaticFetcher);
        assert_eq!(fetcher.name(), "static");

        let url = Url::parse("https://acme.io/").unwrap();
        let page = fetcher.fetch(&url).await.unwrap();
        assert_eq!(page.url, url);
        assert_eq!(page.status_code, 200);
    }
}
