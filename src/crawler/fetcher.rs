//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by an audit:
//! - Building the HTTP client with the configured user agent
//! - GET requests for pages and well-known resources
//! - Status and Content-Type classification

use crate::config::UserAgentConfig;
use crate::probes::ProbeError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use tracing::debug;

/// Maximum redirect hops followed for any request
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched HTTP response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value (empty when absent)
    pub content_type: String,
    /// Response body
    pub body: String,
}

impl FetchedPage {
    pub fn is_html(&self) -> bool {
        let ct = self.content_type.to_ascii_lowercase();
        ct.is_empty() || ct.contains("text/html") || ct.contains("application/xhtml")
    }
}

/// Formats the User-Agent header value
///
/// Format: `Name/Version (+ContactURL)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{})",
        config.name, config.version, config.contact_url
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use context_lint::config::UserAgentConfig;
/// use context_lint::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(15)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body when the status is 2xx
///
/// Non-success statuses become `ProbeError::Status`; transport failures are
/// passed through as `ProbeError::Http`.
pub async fn fetch_url(client: &Client, url: &str) -> Result<FetchedPage, ProbeError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            debug!("Timeout fetching {}", url);
        } else if e.is_connect() {
            debug!("Connection failed for {}", url);
        }
        ProbeError::Http(e)
    })?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(ProbeError::Status {
            url: final_url,
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response.text().await?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

/// Fetches a URL and returns `None` instead of an error for non-2xx statuses
///
/// Used for optional resources (robots.txt, llms.txt, well-known files),
/// where absence is a normal outcome.
pub async fn fetch_optional(client: &Client, url: &str) -> Result<Option<FetchedPage>, ProbeError> {
    match fetch_url(client, url).await {
        Ok(page) => Ok(Some(page)),
        Err(ProbeError::Status { status, .. }) => {
            debug!("{} answered {}", url, status);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
