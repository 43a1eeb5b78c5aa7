//! Title, description, keywords and language

use super::{first_accepted, meta_content};
use crate::normalize::{char_len, collapse_whitespace, truncate_chars};
use crate::types::DEFAULT_LANGUAGE;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Titles shorter than this are treated as decorative
const MIN_TITLE_CHARS: usize = 3;

/// Headings used as a title are cut to this length
const MAX_HEADING_TITLE_CHARS: usize = 100;

/// Descriptions are cut to this length
const MAX_DESCRIPTION_CHARS: usize = 300;

/// Paragraphs must be longer than this to serve as a description
const MIN_PARAGRAPH_CHARS: usize = 50;

/// Consent-banner marker; paragraphs containing it are skipped
const COOKIE_MARKER: &str = "cookie";

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

/// Content areas first, any paragraph last
static PARAGRAPHS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["main p", "article p", ".content p", "p"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// `<title>` → `og:title` → `twitter:title` → first `<h1>`
pub(super) fn title(document: &Html) -> Option<String> {
    first_accepted(
        "title",
        &[
            ("title", &|| {
                document
                    .select(&TITLE)
                    .next()
                    .map(|t| t.text().collect::<String>().trim().to_string())
            }),
            ("og:title", &|| meta_content(document, "property", "og:title")),
            ("twitter:title", &|| {
                meta_content(document, "name", "twitter:title")
            }),
            ("h1", &|| {
                first_text(document, &H1)
                    .map(|h| truncate_chars(&h, MAX_HEADING_TITLE_CHARS).to_string())
            }),
        ],
        |title| char_len(title.trim()) >= MIN_TITLE_CHARS,
    )
}

/// `description` meta → `og:description` → `twitter:description` → first
/// substantial paragraph, cut to 300 characters
pub(super) fn description(document: &Html) -> Option<String> {
    first_accepted(
        "description",
        &[
            ("description", &|| {
                meta_content(document, "name", "description")
            }),
            ("og:description", &|| {
                meta_content(document, "property", "og:description")
            }),
            ("twitter:description", &|| {
                meta_content(document, "name", "twitter:description")
            }),
            ("paragraph", &|| first_paragraph(document)),
        ],
        |description| !description.is_empty(),
    )
    .map(|d| truncate_chars(&d, MAX_DESCRIPTION_CHARS).to_string())
}

fn first_paragraph(document: &Html) -> Option<String> {
    PARAGRAPHS.iter().find_map(|selector| {
        document
            .select(selector)
            .map(element_text)
            .find(|text| {
                char_len(text) > MIN_PARAGRAPH_CHARS
                    && !text.to_lowercase().contains(COOKIE_MARKER)
            })
    })
}

/// Raw `<meta name="keywords">` content
pub(super) fn keywords(document: &Html) -> Option<String> {
    meta_content(document, "name", "keywords")
}

/// `lang` attribute of `<html>`, else "en"
pub(super) fn language(document: &Html) -> String {
    document
        .root_element()
        .value()
        .attr("lang")
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    const LONG_COPY: &str =
        "Acme designs reusable rockets that land themselves on small barges at sea.";

    #[test]
    fn test_title_from_title_element() {
        let d = doc("<title>  Acme Rockets  </title><meta property=\"og:title\" content=\"OG\">");
        assert_eq!(title(&d).as_deref(), Some("Acme Rockets"));
    }

    #[test]
    fn test_short_title_falls_back_to_og() {
        let d = doc(
            "<title>Hi</title>\
             <meta property=\"og:title\" content=\"Acme Open Graph\">\
             <meta name=\"twitter:title\" content=\"Acme Twitter\">",
        );
        assert_eq!(title(&d).as_deref(), Some("Acme Open Graph"));
    }

    #[test]
    fn test_title_falls_back_to_twitter_then_h1() {
        let d = doc("<meta name=\"twitter:title\" content=\"Acme Twitter\"><h1>Heading</h1>");
        assert_eq!(title(&d).as_deref(), Some("Acme Twitter"));

        let d = doc("<title></title><body><h1>  Acme\n   Heading </h1></body>");
        assert_eq!(title(&d).as_deref(), Some("Acme Heading"));
    }

    #[test]
    fn test_h1_title_truncated() {
        let heading = "x".repeat(150);
        let d = doc(&format!("<h1>{heading}</h1>"));
        assert_eq!(title(&d).map(|t| t.len()), Some(100));
    }

    #[test]
    fn test_title_none_when_all_too_short() {
        let d = doc("<title>A</title><h1>B</h1>");
        assert_eq!(title(&d), None);
    }

    #[test]
    fn test_description_prefers_plain_meta() {
        let d = doc(
            "<meta property=\"og:description\" content=\"From OG\">\
             <meta name=\"description\" content=\"From meta\">",
        );
        assert_eq!(description(&d).as_deref(), Some("From meta"));
    }

    #[test]
    fn test_description_og_then_twitter() {
        let d = doc(
            "<meta name=\"twitter:description\" content=\"From Twitter\">\
             <meta property=\"og:description\" content=\"From OG\">",
        );
        assert_eq!(description(&d).as_deref(), Some("From OG"));

        let d = doc("<meta name=\"twitter:description\" content=\"From Twitter\">");
        assert_eq!(description(&d).as_deref(), Some("From Twitter"));
    }

    #[test]
    fn test_description_paragraph_prefers_main() {
        let html = format!(
            "<body><p>Generic paragraph that is long enough to qualify on its own merits.</p>\
             <main><p>{LONG_COPY}</p></main></body>"
        );
        assert_eq!(description(&doc(&html)).as_deref(), Some(LONG_COPY));
    }

    #[test]
    fn test_description_skips_cookie_and_short_paragraphs() {
        let html = format!(
            "<body><p>Too short.</p>\
             <p>We use COOKIES to improve your experience on this website, accept them.</p>\
             <p>{LONG_COPY}</p></body>"
        );
        assert_eq!(description(&doc(&html)).as_deref(), Some(LONG_COPY));
    }

    #[test]
    fn test_description_truncated_to_300() {
        let long = "word ".repeat(100);
        let html = format!("<body><article><p>{long}</p></article></body>");
        let found = description(&doc(&html)).unwrap();
        assert_eq!(char_len(&found), 300);
    }

    #[test]
    fn test_description_none() {
        assert_eq!(description(&doc("<p>short</p>")), None);
    }

    #[test]
    fn test_keywords_and_language() {
        let d = doc(
            "<html lang=\"fr\"><head><meta name=\"keywords\" content=\"saas, crm\"></head></html>",
        );
        assert_eq!(keywords(&d).as_deref(), Some("saas, crm"));
        assert_eq!(language(&d), "fr");

        let d = doc("<html><body></body></html>");
        assert_eq!(keywords(&d), None);
        assert_eq!(language(&d), "en");
    }
}
