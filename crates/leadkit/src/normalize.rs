//! Normalization helpers shared by the fetcher and the extractor
//!
//! URL resolution, text truncation and whitespace cleanup. Everything here
//! is pure: same input, same output.

use crate::error::FetchError;
use scraper::{Html, Node};
use url::Url;

/// Elements whose text never reaches a reader
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Normalize a user-supplied URL
///
/// Inputs without a scheme get `https://` prepended. Inputs with a scheme
/// other than http/https are rejected rather than mangled.
pub fn normalize_url(raw: &str) -> Result<Url, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::MissingUrl);
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else if has_explicit_scheme(trimmed) {
        return Err(FetchError::InvalidUrlScheme);
    } else {
        format!("https://{trimmed}")
    };

    let url =
        Url::parse(&candidate).map_err(|e| FetchError::InvalidUrl(format!("{candidate}: {e}")))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(FetchError::InvalidUrl(format!("{candidate}: missing host")));
    }
    Ok(url)
}

/// True if `s` starts with `scheme://`
fn has_explicit_scheme(s: &str) -> bool {
    match s.find("://") {
        Some(idx) if idx > 0 => s[..idx]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

/// Resolve `href` against the page URL
///
/// Absolute http(s) hrefs are returned verbatim. Root-relative,
/// path-relative and protocol-relative hrefs are joined onto `base`.
/// Anything that does not end up as an http(s) URL (`mailto:`,
/// `javascript:`, `data:`, garbage) yields `None`.
pub fn absolutize(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match Url::parse(href) {
        Ok(url) if is_web_scheme(&url) => Some(href.to_string()),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .join(href)
            .ok()
            .filter(is_web_scheme)
            .map(String::from),
        Err(_) => None,
    }
}

fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// `{scheme}://{host[:port]}/favicon.ico` for the page URL
pub fn default_favicon(base: &Url) -> String {
    format!("{}/favicon.ico", base.origin().ascii_serialization())
}

/// Derive a company name from the URL host
///
/// Strips a leading `www.`, keeps the first label and capitalizes it:
/// `https://www.acme-corp.co.uk/about` gives `Acme-corp`.
pub fn company_from_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next().unwrap_or_default();
    capitalize(label)
}

/// Uppercase the first character, lowercase the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Truncate to at most `max` characters
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Number of characters (not bytes)
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Collapse whitespace runs to a single space and trim
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim an optional string, dropping it if nothing is left
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Concatenated text of the document, skipping script/style content
///
/// Text nodes are joined as-is, in document order.
pub fn visible_text(document: &Html) -> String {
    let mut text = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_TEXT_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            text.push_str(chunk);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://acme.io/about").unwrap()
    }

    #[test]
    fn test_normalize_url_prepends_https() {
        let url = normalize_url("acme.io/pricing").unwrap();
        assert_eq!(url.as_str(), "https://acme.io/pricing");

        let url = normalize_url("  http://acme.io  ").unwrap();
        assert_eq!(url.as_str(), "http://acme.io/");
    }

    #[test]
    fn test_normalize_url_rejects() {
        assert!(matches!(normalize_url(""), Err(FetchError::MissingUrl)));
        assert!(matches!(
            normalize_url("ftp://files.acme.io"),
            Err(FetchError::InvalidUrlScheme)
        ));
        assert!(matches!(
            normalize_url("https://"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_normalize_url_query_with_nested_url() {
        let url = normalize_url("acme.io/go?to=http://other.io").unwrap();
        assert_eq!(url.host_str(), Some("acme.io"));
    }

    #[test]
    fn test_absolutize() {
        let base = base();
        assert_eq!(
            absolutize(&base, "/assets/logo.png").as_deref(),
            Some("https://acme.io/assets/logo.png")
        );
        assert_eq!(
            absolutize(&base, "img/logo.svg").as_deref(),
            Some("https://acme.io/img/logo.svg")
        );
        assert_eq!(
            absolutize(&base, "//cdn.acme.io/logo.png").as_deref(),
            Some("https://cdn.acme.io/logo.png")
        );
        assert_eq!(
            absolutize(&base, "https://cdn.other.com/x.png").as_deref(),
            Some("https://cdn.other.com/x.png")
        );
        assert_eq!(absolutize(&base, "mailto:hi@acme.io"), None);
        assert_eq!(absolutize(&base, "javascript:void(0)"), None);
        assert_eq!(absolutize(&base, "   "), None);
    }

    #[test]
    fn test_default_favicon_keeps_port() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(default_favicon(&url), "http://127.0.0.1:8080/favicon.ico");
        assert_eq!(default_favicon(&base()), "https://acme.io/favicon.ico");
    }

    #[test]
    fn test_company_from_url() {
        let url = Url::parse("https://www.Example.co.uk/path").unwrap();
        assert_eq!(company_from_url(&url), "Example");

        let url = Url::parse("https://shop.acme.io").unwrap();
        assert_eq!(company_from_url(&url), "Shop");

        let url = Url::parse("https://localhost:3000").unwrap();
        assert_eq!(company_from_url(&url), "Localhost");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(char_len("héllo"), 5);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  Acme \n\t Widgets  "),
            "Acme Widgets"
        );
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  x ".to_string())), Some("x".to_string()));
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_visible_text_skips_scripts() {
        let html = Html::parse_document(
            "<html><head><script>var x = 'a@b.io';</script></head>\
             <body><p>Mail sales@acme.io</p><style>.x{}</style></body></html>",
        );
        let text = visible_text(&html);
        assert!(text.contains("sales@acme.io"));
        assert!(!text.contains("a@b.io"));
        assert!(!text.contains(".x{}"));
    }
}
