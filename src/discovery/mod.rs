//! Page discovery for site audits
//!
//! Picks the pages a site audit samples: sitemap URLs first, same-origin
//! links from the seed page as fallback and top-up, seed always first.

mod sitemap;

pub use sitemap::{fetch_sitemap, parse_sitemap, SitemapDocument};

use crate::probes::Probes;
use crate::report::{DiscoveryMethod, DiscoveryResult};
use crate::robots::ParsedRobots;
use crate::url::{is_page_resource, normalize_url, origin_of, same_origin};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Sitemaps read per discovery
const MAX_SITEMAPS: usize = 3;

/// Token with no group of its own, so robots.txt `*` rules decide
const DISCOVERY_AGENT: &str = "ContextLint";

/// Selects the pages to sample from already-resolved candidate lists
///
/// Candidates must share the seed's origin, look like HTML pages and be
/// allowed for `*` by the seed's robots.txt. The result is deduplicated in
/// first-seen order, starts with the seed, and holds at most `max_pages` URLs
/// (a zero budget still samples the seed).
///
/// # Arguments
///
/// * `seed` - The seed URL as given by the caller
/// * `sitemap_urls` - URLs read from the site's sitemaps
/// * `seed_links` - Links found on the seed page
/// * `robots_txt` - The seed's robots.txt body, if any
/// * `max_pages` - Page budget, seed included
pub fn select_pages(
    seed: &str,
    sitemap_urls: &[String],
    seed_links: &[String],
    robots_txt: Option<&str>,
    max_pages: usize,
) -> DiscoveryResult {
    let seed_url = normalize_url(seed).ok();
    let robots = robots_txt.map(ParsedRobots::from_content);

    let mut seen: HashSet<String> = HashSet::new();
    if let Some(seed_url) = &seed_url {
        seen.insert(seed_url.to_string());
    }

    let mut accept = |candidate: &String| -> Option<String> {
        let url = normalize_url(candidate).ok()?;
        let seed_url = seed_url.as_ref()?;
        if !same_origin(&url, seed_url) || !is_page_resource(&url) {
            return None;
        }
        let url = url.to_string();
        if let Some(robots) = &robots {
            if !robots.is_allowed(&url, DISCOVERY_AGENT) {
                return None;
            }
        }
        seen.insert(url.clone()).then_some(url)
    };

    let from_sitemap: Vec<String> = sitemap_urls.iter().filter_map(&mut accept).collect();
    let from_links: Vec<String> = seed_links.iter().filter_map(&mut accept).collect();

    let method = if !from_sitemap.is_empty() {
        DiscoveryMethod::Sitemap
    } else if !from_links.is_empty() {
        DiscoveryMethod::Spider
    } else {
        DiscoveryMethod::None
    };

    let urls_found_total = 1 + from_sitemap.len() + from_links.len();
    let mut urls_sampled: Vec<String> = std::iter::once(seed.to_string())
        .chain(from_sitemap)
        .chain(from_links)
        .collect();
    urls_sampled.truncate(max_pages.max(1));

    let detail = match method {
        DiscoveryMethod::Sitemap => format!(
            "Sampled {} of {} URLs (sitemap)",
            urls_sampled.len(),
            urls_found_total
        ),
        DiscoveryMethod::Spider => format!(
            "Sampled {} of {} URLs (seed page links)",
            urls_sampled.len(),
            urls_found_total
        ),
        _ => "No additional pages discovered".to_string(),
    };

    DiscoveryResult {
        method,
        urls_sampled,
        urls_found_total,
        detail,
    }
}

/// Sitemap locations for a site: robots.txt `Sitemap:` lines, else `/sitemap.xml`
pub fn sitemap_locations(seed: &Url, robots_txt: Option<&str>) -> Vec<String> {
    let declared = robots_txt
        .map(|body| ParsedRobots::from_content(body).sitemaps())
        .unwrap_or_default();

    if declared.is_empty() {
        vec![format!("{}/sitemap.xml", origin_of(seed))]
    } else {
        declared.into_iter().take(MAX_SITEMAPS).collect()
    }
}

/// Discovers pages to sample for a site audit
///
/// Sitemap failures degrade silently to the seed-link fallback; each sitemap
/// fetch is bounded by `timeout`.
pub async fn discover_pages(
    probes: &dyn Probes,
    seed: &str,
    robots_txt: Option<&str>,
    seed_links: &[String],
    max_pages: usize,
    timeout: Duration,
) -> DiscoveryResult {
    let mut sitemap_urls = Vec::new();

    if let Ok(seed_url) = Url::parse(seed) {
        for location in sitemap_locations(&seed_url, robots_txt) {
            match tokio::time::timeout(timeout, probes.sitemap(&location)).await {
                Ok(Ok(urls)) => {
                    debug!("Sitemap {} listed {} URLs", location, urls.len());
                    sitemap_urls.extend(urls);
                }
                Ok(Err(e)) => debug!("Sitemap {} unavailable: {}", location, e),
                Err(_) => debug!("Sitemap {} timed out", location),
            }
        }
    }

    let result = select_pages(seed, &sitemap_urls, seed_links, robots_txt, max_pages);
    info!(
        "Discovery for {} via {}: {} pages sampled",
        seed,
        result.method,
        result.urls_sampled.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_zero_budget_keeps_seed() {
        let sitemap = urls(&["https://example.com/a"]);
        let result = select_pages("https://example.com/", &sitemap, &[], None, 0);
        assert_eq!(result.urls_sampled, urls(&["https://example.com/"]));
    }

    #[test]
    fn test_seed_only_when_nothing_found() {
        let result = select_pages("https://example.com/", &[], &[], None, 10);
        assert_eq!(result.method, DiscoveryMethod::None);
        assert_eq!(result.urls_sampled, urls(&["https://example.com/"]));
    }

    #[test]
    fn test_sitemap_first_then_links() {
        let sitemap = urls(&["https://example.com/a", "https://example.com/b"]);
        let links = urls(&["https://example.com/c", "https://example.com/a/"]);
        let result = select_pages("https://example.com/", &sitemap, &links, None, 10);

        assert_eq!(result.method, DiscoveryMethod::Sitemap);
        assert_eq!(
            result.urls_sampled,
            urls(&[
                "https://example.com/",
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c"
            ])
        );
        assert_eq!(result.urls_found_total, 4);
    }

    #[test]
    fn test_spider_fallback() {
        let links = urls(&["https://example.com/docs", "https://other.com/x"]);
        let result = select_pages("https://example.com", &[], &links, None, 10);
        assert_eq!(result.method, DiscoveryMethod::Spider);
        assert_eq!(
            result.urls_sampled,
            urls(&["https://example.com", "https://example.com/docs"])
        );
    }

    #[test]
    fn test_filters_foreign_origin_resources_and_seed_duplicates() {
        let sitemap = urls(&[
            "https://example.com/",
            "http://example.com/insecure",
            "https://blog.example.com/post",
            "https://example.com/brochure.pdf",
            "https://example.com/ok#frag",
        ]);
        let result = select_pages("https://example.com/", &sitemap, &[], None, 10);
        assert_eq!(
            result.urls_sampled,
            urls(&["https://example.com/", "https://example.com/ok"])
        );
    }

    #[test]
    fn test_robots_disallowed_dropped() {
        let sitemap = urls(&["https://example.com/private/a", "https://example.com/public"]);
        let robots = "User-agent: *\nDisallow: /private";
        let result = select_pages("https://example.com/", &sitemap, &[], Some(robots), 10);
        assert_eq!(
            result.urls_sampled,
            urls(&["https://example.com/", "https://example.com/public"])
        );
    }

    #[test]
    fn test_truncated_to_budget() {
        let sitemap: Vec<String> = (0..50).map(|i| format!("https://example.com/p{}", i)).collect();
        let result = select_pages("https://example.com/", &sitemap, &[], None, 5);
        assert_eq!(result.urls_sampled.len(), 5);
        assert_eq!(result.urls_sampled[0], "https://example.com/");
        assert_eq!(result.urls_found_total, 51);
    }

    #[test]
    fn test_sitemap_locations() {
        let seed = Url::parse("https://example.com/docs").unwrap();
        assert_eq!(
            sitemap_locations(&seed, None),
            urls(&["https://example.com/sitemap.xml"])
        );
        assert_eq!(
            sitemap_locations(&seed, Some("Sitemap: https://example.com/map.xml")),
            urls(&["https://example.com/map.xml"])
        );
    }
}
