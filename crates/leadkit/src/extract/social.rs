//! Social profile links

use super::{meta_content, ANCHOR};
use crate::normalize::absolutize;
use scraper::Html;
use url::Url;

/// Social profiles found on a page
///
/// Each slot is filled at most once: the first match in document order
/// sticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinks {
    pub twitter_handle: Option<String>,
    pub linkedin_url: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
}

impl SocialLinks {
    /// Scan `twitter:site` and then every anchor in one pass
    pub fn scan(document: &Html, base: &Url) -> Self {
        let mut links = Self {
            twitter_handle: meta_content(document, "name", "twitter:site")
                .map(|site| site.trim_start_matches('@').to_string())
                .filter(|handle| !handle.is_empty()),
            ..Default::default()
        };

        for href in document
            .select(&ANCHOR)
            .filter_map(|anchor| anchor.value().attr("href"))
        {
            links.observe(href, base);
        }

        links
    }

    /// Offer one href to whichever slot its platform maps to
    pub fn observe(&mut self, href: &str, base: &Url) {
        let lower = href.to_lowercase();

        // A filled twitter slot lets the href through to the other platforms
        if lower.contains("twitter.com") && self.twitter_handle.is_none() {
            self.twitter_handle = twitter_handle(&lower);
            return;
        }

        let slot = if lower.contains("linkedin.com") {
            &mut self.linkedin_url
        } else if lower.contains("facebook.com") {
            &mut self.facebook_url
        } else if lower.contains("instagram.com") {
            &mut self.instagram_url
        } else {
            return;
        };

        if slot.is_none() {
            *slot = absolutize(base, href);
        }
    }

    /// True when no profile was found
    pub fn is_empty(&self) -> bool {
        self.twitter_handle.is_none()
            && self.linkedin_url.is_none()
            && self.facebook_url.is_none()
            && self.instagram_url.is_none()
    }
}

/// Path segment after `twitter.com/`, cut at the next `?` or `/`
fn twitter_handle(href: &str) -> Option<String> {
    let (_, rest) = href.rsplit_once("twitter.com/")?;
    let handle = rest.split(['?', '/']).next()?.trim_start_matches('@');
    (!handle.is_empty()).then(|| handle.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://acme.io/").unwrap()
    }

    #[test]
    fn test_twitter_handle_parsing() {
        assert_eq!(
            twitter_handle("https://twitter.com/acme?lang=en").as_deref(),
            Some("acme")
        );
        assert_eq!(
            twitter_handle("https://twitter.com/acme/status/1").as_deref(),
            Some("acme")
        );
        assert_eq!(
            twitter_handle("https://www.twitter.com/@acme").as_deref(),
            Some("acme")
        );
        assert_eq!(twitter_handle("https://twitter.com/"), None);
        assert_eq!(twitter_handle("https://twitter.com"), None);
    }

    #[test]
    fn test_scan_first_match_sticks() {
        let d = Html::parse_document(
            r#"<a href="https://twitter.com/First">t1</a>
               <a href="https://twitter.com/second">t2</a>
               <a href="https://www.linkedin.com/company/acme">li</a>
               <a href="https://www.linkedin.com/company/other">li2</a>
               <a href="https://facebook.com/AcmeHQ">fb</a>
               <a href="https://instagram.com/acme.hq">ig</a>"#,
        );
        let links = SocialLinks::scan(&d, &base());

        assert_eq!(links.twitter_handle.as_deref(), Some("first"));
        assert_eq!(
            links.linkedin_url.as_deref(),
            Some("https://www.linkedin.com/company/acme")
        );
        assert_eq!(
            links.facebook_url.as_deref(),
            Some("https://facebook.com/AcmeHQ")
        );
        assert_eq!(
            links.instagram_url.as_deref(),
            Some("https://instagram.com/acme.hq")
        );
    }

    #[test]
    fn test_scan_prefers_twitter_site_meta() {
        let d = Html::parse_document(
            r#"<meta name="twitter:site" content="@acmehq">
               <a href="https://twitter.com/someone">t</a>"#,
        );
        let links = SocialLinks::scan(&d, &base());
        assert_eq!(links.twitter_handle.as_deref(), Some("acmehq"));
    }

    #[test]
    fn test_scan_twitter_mention_after_handle_reaches_linkedin() {
        let d = Html::parse_document(
            r#"<meta name="twitter:site" content="@acme">
               <a href="https://www.linkedin.com/shareArticle?source=twitter.com/acme">share</a>"#,
        );
        let links = SocialLinks::scan(&d, &base());
        assert_eq!(links.twitter_handle.as_deref(), Some("acme"));
        assert_eq!(
            links.linkedin_url.as_deref(),
            Some("https://www.linkedin.com/shareArticle?source=twitter.com/acme")
        );
    }

    #[test]
    fn test_scan_protocol_relative_made_absolute() {
        let d = Html::parse_document(r#"<a href="//www.facebook.com/acme">fb</a>"#);
        let links = SocialLinks::scan(&d, &base());
        assert_eq!(
            links.facebook_url.as_deref(),
            Some("https://www.facebook.com/acme")
        );
    }

    #[test]
    fn test_scan_nothing_found() {
        let d = Html::parse_document(r#"<a href="/pricing">Pricing</a>"#);
        assert!(SocialLinks::scan(&d, &base()).is_empty());
    }
}
