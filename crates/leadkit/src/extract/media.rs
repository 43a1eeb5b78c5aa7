//! Logo and favicon

use super::{first_accepted, meta_content};
use crate::normalize::{absolutize, default_favicon};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static LOGO_IMG: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"img[class*="logo"], img[id*="logo"], .logo img, #logo img"#).unwrap()
});
static ICON_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("link[rel]").unwrap());

/// `og:image` → first logo-looking `<img>`, made absolute
pub(super) fn logo(document: &Html, base: &Url) -> Option<String> {
    first_accepted(
        "logo_url",
        &[
            ("og:image", &|| {
                meta_content(document, "property", "og:image")
                    .and_then(|src| absolutize(base, &src))
            }),
            ("img", &|| {
                document
                    .select(&LOGO_IMG)
                    .filter_map(|img| img.value().attr("src"))
                    .find_map(|src| absolutize(base, src))
            }),
        ],
        |url| !url.is_empty(),
    )
}

/// First `<link>` whose rel mentions "icon", else `/favicon.ico` on the
/// page origin
pub(super) fn favicon(document: &Html, base: &Url) -> String {
    document
        .select(&ICON_LINK)
        .filter(|link| {
            link.value()
                .attr("rel")
                .is_some_and(|rel| rel.to_lowercase().contains("icon"))
        })
        .filter_map(|link| link.value().attr("href"))
        .find_map(|href| absolutize(base, href))
        .unwrap_or_else(|| default_favicon(base))
}
