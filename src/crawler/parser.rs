//! Link extraction for page discovery
//!
//! Only `<a href>` anchors and the canonical link count as candidate pages.
//! Downloads, non-HTTP schemes and in-page anchors never do.

use crate::url::{is_page_resource, normalize_url, same_origin};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

static CANONICAL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("link[rel='canonical'][href]").expect("canonical selector is valid")
});

const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Absolute HTTP(S) link targets of a document, in document order
///
/// `rel="nofollow"` is ignored: discovery samples pages, it does not crawl.
pub fn page_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let anchors = document
        .select(&ANCHORS)
        .filter(|a| a.value().attr("download").is_none())
        .filter_map(|a| a.value().attr("href"));
    let canonical = document
        .select(&CANONICAL)
        .filter_map(|link| link.value().attr("href"));

    anchors
        .chain(canonical)
        .filter_map(|href| resolve(href, base_url))
        .collect()
}

fn resolve(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let lower = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }

    let url = base_url.join(href).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// Same-origin page links of a document, normalized and deduplicated
///
/// First-seen order is kept; non-page resources (PDFs, images, archives)
/// are dropped.
pub fn internal_links(html: &str, base_url: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    page_links(html, base_url)
        .into_iter()
        .filter_map(|link| normalize_url(link.as_str()).ok())
        .filter(|url| same_origin(url, base_url) && is_page_resource(url))
        .map(|url| url.to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
