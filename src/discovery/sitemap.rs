//! Sitemap XML parsing for page discovery
//!
//! Supports both sitemap formats:
//!
//! - **Standard sitemap**: `<urlset>` with `<url><loc>` entries
//! - **Sitemap index**: `<sitemapindex>` with `<sitemap><loc>` entries
//!   pointing at child sitemaps (followed one level deep)

use crate::crawler::fetch_url;
use crate::probes::{ProbeError, ProbeResult};
use futures::future::join_all;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use tracing::{debug, warn};

/// Maximum number of child sitemaps fetched from an index
const MAX_CHILD_SITEMAPS: usize = 10;

/// Parsed sitemap content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapDocument {
    /// Page URLs from `<url><loc>`
    pub pages: Vec<String>,
    /// Child sitemap URLs from `<sitemap><loc>`
    pub children: Vec<String>,
}

/// Parses sitemap or sitemap index XML
///
/// # Examples
///
/// ```
/// use context_lint::discovery::parse_sitemap;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/page1</loc></url>
/// </urlset>"#;
///
/// let doc = parse_sitemap(xml).unwrap();
/// assert_eq!(doc.pages, vec!["https://example.com/page1".to_string()]);
/// ```
pub fn parse_sitemap(xml: &str) -> ProbeResult<SitemapDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = SitemapDocument::default();
    let mut buf = Vec::new();
    let mut parent: Option<String> = None;
    let mut in_loc = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "url" | "sitemap" => parent = Some(name),
                    "loc" if parent.is_some() => in_loc = true,
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "url" | "sitemap" => parent = None,
                    "loc" => in_loc = false,
                    _ => {}
                }
            }
            Ok(Event::Text(e)) if in_loc => {
                let text = e.unescape().map_err(|e| ProbeError::Parse(e.to_string()))?;
                let loc = text.trim().to_string();
                if !loc.is_empty() {
                    match parent.as_deref() {
                        Some("url") => doc.pages.push(loc),
                        Some("sitemap") => doc.children.push(loc),
                        _ => {}
                    }
                }
            }
            Ok(Event::CData(e)) if in_loc => {
                let loc = String::from_utf8_lossy(&e.into_inner()).trim().to_string();
                if !loc.is_empty() {
                    match parent.as_deref() {
                        Some("url") => doc.pages.push(loc),
                        Some("sitemap") => doc.children.push(loc),
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ProbeError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(doc)
}

/// Fetches a sitemap and returns its page URLs
///
/// A sitemap index is followed one level deep (at most ten children, fetched
/// concurrently). Children that fail to load are skipped.
pub async fn fetch_sitemap(client: &Client, url: &str) -> ProbeResult<Vec<String>> {
    debug!("Fetching sitemap {}", url);
    let page = fetch_url(client, url).await?;
    let doc = parse_sitemap(&page.body)?;

    let mut pages = doc.pages;
    if doc.children.is_empty() {
        return Ok(pages);
    }

    let children: Vec<String> = doc.children.into_iter().take(MAX_CHILD_SITEMAPS).collect();
    debug!("Fetching {} child sitemaps from index", children.len());

    let results = join_all(children.iter().map(|child| async move {
        let page = fetch_url(client, child).await?;
        parse_sitemap(&page.body)
    }))
    .await;

    for (child, result) in children.iter().zip(results) {
        match result {
            Ok(child_doc) => pages.extend(child_doc.pages),
            Err(e) => warn!("Failed to fetch child sitemap {}: {}", child, e),
        }
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserAgentConfig;
    use crate::crawler::build_http_client;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_urlset() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url><loc>https://example.com/</loc><lastmod>2024-01-15</lastmod></url>
              <url><loc> https://example.com/docs </loc></url>
            </urlset>"#;
        let doc = parse_sitemap(xml).unwrap();
        assert_eq!(
            doc.pages,
            vec![
                "https://example.com/".to_string(),
                "https://example.com/docs".to_string()
            ]
        );
        assert!(doc.children.is_empty());
    }

    #[test]
    fn test_parse_index() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <sitemap><loc>https://example.com/a.xml</loc></sitemap>
              <sitemap><loc>https://example.com/b.xml</loc></sitemap>
            </sitemapindex>"#;
        let doc = parse_sitemap(xml).unwrap();
        assert!(doc.pages.is_empty());
        assert_eq!(doc.children.len(), 2);
    }

    #[test]
    fn test_parse_escaped_loc() {
        let xml = "<urlset><url><loc>https://example.com/?a=1&amp;b=2</loc></url></urlset>";
        let doc = parse_sitemap(xml).unwrap();
        assert_eq!(doc.pages, vec!["https://example.com/?a=1&b=2".to_string()]);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_sitemap("<urlset><url><loc>x</url></urlset>").is_err());
    }

    #[tokio::test]
    async fn test_fetch_index_follows_children() {
        let server = MockServer::start().await;
        let index = format!(
            "<sitemapindex><sitemap><loc>{0}/one.xml</loc></sitemap><sitemap><loc>{0}/missing.xml</loc></sitemap></sitemapindex>",
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/one.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<urlset><url><loc>https://example.com/p1</loc></url></urlset>",
            ))
            .mount(&server)
            .await;

        let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
        let pages = fetch_sitemap(&client, &format!("{}/sitemap.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(pages, vec!["https://example.com/p1".to_string()]);
    }
}
