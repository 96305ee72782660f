//! Crawler module for page fetching and extraction
//!
//! This module contains the page-level fetching logic, including:
//! - HTTP client construction and fetching
//! - HTML parsing and link extraction
//! - Markdown rendering for content analysis

mod fetcher;
mod markdown;
mod parser;

pub use fetcher::{
    build_http_client, fetch_optional, fetch_url, user_agent_string, FetchedPage,
};
pub use markdown::html_to_markdown;
pub use parser::{internal_links, page_links};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Extraction result for one page
///
/// A failed fetch is a value (`success == false` with `error` set), not an
/// `Err`; page failures never abort a multi-page audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub url: String,
    pub html: String,
    pub markdown: String,
    pub success: bool,
    pub error: Option<String>,
    /// Same-origin page links, normalized and deduplicated
    pub internal_links: Vec<String>,
}

impl CrawlResult {
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Builds a successful result from fetched HTML
    pub fn from_html(url: &str, html: String) -> Self {
        let internal_links = Url::parse(url)
            .map(|base| internal_links(&html, &base))
            .unwrap_or_default();
        let markdown = html_to_markdown(&html);

        Self {
            url: url.to_string(),
            html,
            markdown,
            success: true,
            error: None,
            internal_links,
        }
    }
}

/// Fetches one page and extracts its markdown and internal links
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page URL
///
/// # Returns
///
/// A CrawlResult; network and status failures are reported inside it
pub async fn extract_page(client: &Client, url: &str) -> CrawlResult {
    match fetch_url(client, url).await {
        Ok(page) if page.is_html() => CrawlResult::from_html(url, page.body),
        Ok(page) => CrawlResult::failed(url, format!("Not an HTML page: {}", page.content_type)),
        Err(e) => {
            debug!("Extraction failed for {}: {}", url, e);
            CrawlResult::failed(url, e.to_string())
        }
    }
}
