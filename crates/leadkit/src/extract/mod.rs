//! Lead extraction from fetched HTML
//!
//! Each field is produced by an ordered fallback chain: candidates are
//! evaluated lazily, most structured signal first, and the first accepted
//! candidate wins. Later candidates are never evaluated once one succeeds.
//!
//! Extraction never fails. A field with no accepted candidate keeps its
//! default (`None`, a sentinel, or "en").

mod contact;
mod media;
mod meta;
mod social;

pub use social::SocialLinks;

use crate::normalize::visible_text;
use crate::types::LeadRecord;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static META: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// A named step in a fallback chain
type Candidate<'a> = (&'static str, &'a dyn Fn() -> Option<String>);

/// Evaluate `chain` in order and return the first value `accept` keeps
fn first_accepted(
    field: &'static str,
    chain: &[Candidate<'_>],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    chain.iter().find_map(|(source, produce)| {
        let value = produce().filter(|v| accept(v.as_str()))?;
        debug!(field, source, "Extracted field");
        Some(value)
    })
}

/// Content of the first `<meta>` whose `attr` equals `value`
/// (case-insensitive) and whose trimmed content is non-empty
fn meta_content(document: &Html, attr: &str, value: &str) -> Option<String> {
    document
        .select(&META)
        .filter(|meta| {
            meta.value()
                .attr(attr)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
        })
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

/// Extract a lead record from `html` fetched from `page_url`
///
/// Pure: identical input yields identical output.
pub fn extract(html: &str, page_url: &Url) -> LeadRecord {
    let document = Html::parse_document(html);
    let mut record = LeadRecord::new(page_url);

    if let Some(title) = meta::title(&document) {
        record.title = title;
    }
    if let Some(description) = meta::description(&document) {
        record.description = description;
    }

    let text = visible_text(&document);
    record.email = contact::email(&text);
    record.phone = contact::phone(&text);

    record.logo_url = media::logo(&document, page_url);
    record.favicon_url = Some(media::favicon(&document, page_url));

    let social = SocialLinks::scan(&document, page_url);
    record.twitter_handle = social.twitter_handle;
    record.linkedin_url = social.linkedin_url;
    record.facebook_url = social.facebook_url;
    record.instagram_url = social.instagram_url;

    record.contact_page = contact::contact_page(&document, page_url);
    record.industry_keywords = meta::keywords(&document);
    record.language = meta::language(&document);

    record
}
