//! Probe layer
//!
//! A probe is one independent check against a site: a network fetch that
//! yields a typed report, or a pure analysis of fetched HTML/markdown. The
//! orchestrator talks to the network probes only through the [`Probes`]
//! trait, so tests can swap in fakes.

mod agent;
mod content;
mod error;
mod semantic_html;
mod signals;
mod site;
mod structured_data;

pub use agent::{check_agents_md, check_markdown_accept, check_mcp_endpoint, check_nlweb, check_x402};
pub use content::analyze_content;
pub use error::{ProbeError, ProbeResult};
pub use semantic_html::analyze_semantic_html;
pub use signals::{check_eeat, check_rsl, parse_content_usage};
pub use site::{check_content_usage, check_llms_txt, check_robots};
pub use structured_data::parse_structured_data;

use crate::config::UserAgentConfig;
use crate::crawler::{build_http_client, extract_page, CrawlResult};
use crate::discovery::fetch_sitemap;
use crate::report::{
    AgentsMdReport, ContentUsageReport, LlmsTxtReport, MarkdownAcceptReport, McpEndpointReport,
    NlwebReport, RobotsReport, X402Report,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Network collaborators of an audit
///
/// Every method is independent of the others and may fail; failures are
/// values, never panics.
#[async_trait]
pub trait Probes: Send + Sync {
    /// Unscored robots report plus the raw robots.txt body
    async fn robots(&self, url: &str, bots: &[String]) -> ProbeResult<(RobotsReport, Option<String>)>;

    async fn llms_txt(&self, url: &str) -> ProbeResult<LlmsTxtReport>;

    async fn content_usage(&self, url: &str) -> ProbeResult<ContentUsageReport>;

    /// Fetches a page and extracts its markdown and internal links
    async fn extract_page(&self, url: &str) -> ProbeResult<CrawlResult>;

    /// Extracts several pages in order with `delay` between requests
    ///
    /// A page whose extraction errors is returned as a failed result.
    async fn extract_pages(&self, urls: &[String], delay: Duration) -> Vec<CrawlResult> {
        let mut results = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            debug!("Crawling page {}/{}: {}", i + 1, urls.len(), url);
            let result = match self.extract_page(url).await {
                Ok(result) => result,
                Err(e) => CrawlResult::failed(url, e.to_string()),
            };
            results.push(result);
        }
        results
    }

    async fn agents_md(&self, url: &str) -> ProbeResult<AgentsMdReport>;

    async fn markdown_accept(&self, url: &str) -> ProbeResult<MarkdownAcceptReport>;

    async fn mcp_endpoint(&self, url: &str) -> ProbeResult<McpEndpointReport>;

    async fn x402(&self, url: &str) -> ProbeResult<X402Report>;

    async fn nlweb(&self, url: &str) -> ProbeResult<NlwebReport>;

    /// Page URLs listed by a sitemap (index children followed)
    async fn sitemap(&self, sitemap_url: &str) -> ProbeResult<Vec<String>>;
}

/// Probes backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpProbes {
    client: Client,
}

impl HttpProbes {
    /// Builds probes with the configured user agent and request timeout
    pub fn new(user_agent: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Probes for HttpProbes {
    async fn robots(&self, url: &str, bots: &[String]) -> ProbeResult<(RobotsReport, Option<String>)> {
        check_robots(&self.client, url, bots).await
    }

    async fn llms_txt(&self, url: &str) -> ProbeResult<LlmsTxtReport> {
        check_llms_txt(&self.client, url).await
    }

    async fn content_usage(&self, url: &str) -> ProbeResult<ContentUsageReport> {
        check_content_usage(&self.client, url).await
    }

    async fn extract_page(&self, url: &str) -> ProbeResult<CrawlResult> {
        Ok(extract_page(&self.client, url).await)
    }

    async fn agents_md(&self, url: &str) -> ProbeResult<AgentsMdReport> {
        check_agents_md(&self.client, url).await
    }

    async fn markdown_accept(&self, url: &str) -> ProbeResult<MarkdownAcceptReport> {
        check_markdown_accept(&self.client, url).await
    }

    async fn mcp_endpoint(&self, url: &str) -> ProbeResult<McpEndpointReport> {
        check_mcp_endpoint(&self.client, url).await
    }

    async fn x402(&self, url: &str) -> ProbeResult<X402Report> {
        check_x402(&self.client, url).await
    }

    async fn nlweb(&self, url: &str) -> ProbeResult<NlwebReport> {
        check_nlweb(&self.client, url).await
    }

    async fn sitemap(&self, sitemap_url: &str) -> ProbeResult<Vec<String>> {
        fetch_sitemap(&self.client, sitemap_url).await
    }
}
