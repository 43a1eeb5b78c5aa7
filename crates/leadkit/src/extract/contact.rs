//! Email, phone and contact page

use super::ANCHOR;
use crate::normalize::absolutize;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

/// North American pattern first, then international
static PHONE_RES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"\+?1?[-.]?\(?\d{3}\)?[-.]?\d{3}[-.]?\d{4}").unwrap(),
        Regex::new(r"\+\d{1,3}[-.]?\d{3,4}[-.]?\d{3,4}[-.]?\d{3,4}").unwrap(),
    ]
});

/// Addresses containing any of these are placeholders or unmonitored
const EMAIL_NOISE: &[&str] = &["example", "test", "noreply", "no-reply"];

/// Words that mark a link as a contact or about page
const CONTACT_WORDS: &[&str] = &["contact", "about", "get-in-touch"];

/// First plausible email address in document order
pub(super) fn email(text: &str) -> Option<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|candidate| {
            let lower = candidate.to_lowercase();
            !EMAIL_NOISE.iter().any(|noise| lower.contains(noise))
        })
        .map(str::to_string)
}

/// First match of the first phone pattern that matches at all
pub(super) fn phone(text: &str) -> Option<String> {
    PHONE_RES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}

/// First link whose href or text mentions contact/about, made absolute
///
/// Links that cannot be made into an http(s) URL (`mailto:` and friends)
/// are passed over.
pub(super) fn contact_page(document: &Html, base: &Url) -> Option<String> {
    document.select(&ANCHOR).find_map(|anchor| {
        let href = anchor.value().attr("href")?;
        let href_lower = href.to_lowercase();
        let text_lower = anchor.text().collect::<String>().to_lowercase();
        let mentions = CONTACT_WORDS
            .iter()
            .any(|word| href_lower.contains(word) || text_lower.contains(word));
        if !mentions {
            return None;
        }
        let page = absolutize(base, href)?;
        debug!(href, "Found contact page");
        Some(page)
    })
}
