//! Agent readiness HTTP probes
//!
//! Each probe awards its full sub-signal points when the signal is present.

use super::error::ProbeResult;
use super::site::origin;
use crate::crawler::fetch_optional;
use crate::report::{AgentsMdReport, MarkdownAcceptReport, McpEndpointReport, NlwebReport, X402Report};
use crate::scoring::AGENT_READINESS_RULES;
use reqwest::header::{ACCEPT, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Client, StatusCode};
use serde_json::Value;

const AGENTS_MD_PATHS: &[&str] = &["/agents.md", "/AGENTS.md", "/.well-known/agents.md"];

const MCP_PATH: &str = "/.well-known/mcp.json";

const NLWEB_PATH: &str = "/.well-known/nlweb.json";

/// Response headers that announce an x402 payment requirement
const PAYMENT_HEADERS: &[&str] = &["x-payment-required", "payment-required", "x-payment"];

/// Soft-404 pages are HTML; a manifest never is
fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start().get(..200).unwrap_or(body.trim_start());
    let head = head.to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// Probes the AGENTS.md locations
pub async fn check_agents_md(client: &Client, url: &str) -> ProbeResult<AgentsMdReport> {
    let origin = origin(url)?;

    for path in AGENTS_MD_PATHS {
        let probe_url = format!("{}{}", origin, path);
        if let Some(page) = fetch_optional(client, &probe_url).await? {
            if !page.body.trim().is_empty() && !looks_like_html(&page.body) {
                return Ok(AgentsMdReport {
                    found: true,
                    detail: format!("Found at {}", probe_url),
                    url: Some(probe_url),
                    score: AGENT_READINESS_RULES.agents_md,
                });
            }
        }
    }

    Ok(AgentsMdReport {
        detail: "AGENTS.md not found".to_string(),
        ..AgentsMdReport::default()
    })
}

/// Requests the page with `Accept: text/markdown`
pub async fn check_markdown_accept(client: &Client, url: &str) -> ProbeResult<MarkdownAcceptReport> {
    let response = client
        .get(url)
        .header(ACCEPT, "text/markdown, text/x-markdown;q=0.9")
        .send()
        .await?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let supported = response.status().is_success()
        && content_type
            .as_deref()
            .map(|ct| {
                let ct = ct.to_ascii_lowercase();
                ct.contains("text/markdown") || ct.contains("text/x-markdown")
            })
            .unwrap_or(false);

    Ok(MarkdownAcceptReport {
        supported,
        score: if supported {
            AGENT_READINESS_RULES.markdown_accept
        } else {
            0.0
        },
        detail: if supported {
            "Serves markdown on Accept: text/markdown".to_string()
        } else {
            format!(
                "Markdown not negotiated (got {})",
                content_type.as_deref().unwrap_or("no content type")
            )
        },
        content_type,
    })
}

/// Fetches the MCP discovery document and counts its tools
pub async fn check_mcp_endpoint(client: &Client, url: &str) -> ProbeResult<McpEndpointReport> {
    let probe_url = format!("{}{}", origin(url)?, MCP_PATH);

    let Some(page) = fetch_optional(client, &probe_url).await? else {
        return Ok(McpEndpointReport {
            detail: "No MCP discovery document".to_string(),
            ..McpEndpointReport::default()
        });
    };

    let Ok(json) = serde_json::from_str::<Value>(&page.body) else {
        return Ok(McpEndpointReport {
            url: Some(probe_url),
            detail: "MCP discovery document is not valid JSON".to_string(),
            ..McpEndpointReport::default()
        });
    };

    let tools_count = json.get("tools").and_then(Value::as_array).map(Vec::len);
    let detail = match tools_count {
        Some(n) => format!("MCP endpoint with {} tools", n),
        None => "MCP endpoint found".to_string(),
    };

    Ok(McpEndpointReport {
        found: true,
        url: Some(probe_url),
        tools_count,
        score: AGENT_READINESS_RULES.mcp_endpoint,
        detail,
    })
}

/// Looks for an HTTP 402 challenge or x402 payment headers on the page
pub async fn check_x402(client: &Client, url: &str) -> ProbeResult<X402Report> {
    let response = client.get(url).send().await?;

    let has_402_status = response.status() == StatusCode::PAYMENT_REQUIRED;
    let headers = response.headers();
    let has_payment_header = PAYMENT_HEADERS.iter().any(|h| headers.contains_key(*h))
        || headers
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase().starts_with("x402"))
            .unwrap_or(false);

    let found = has_402_status || has_payment_header;
    Ok(X402Report {
        found,
        has_402_status,
        has_payment_header,
        score: if found { AGENT_READINESS_RULES.x402 } else { 0.0 },
        detail: if found {
            "x402 payment signal present".to_string()
        } else {
            "No x402 payment signal".to_string()
        },
    })
}

/// Fetches the NLWeb discovery document
pub async fn check_nlweb(client: &Client, url: &str) -> ProbeResult<NlwebReport> {
    let probe_url = format!("{}{}", origin(url)?, NLWEB_PATH);

    let Some(page) = fetch_optional(client, &probe_url).await? else {
        return Ok(NlwebReport {
            detail: "No NLWeb discovery document".to_string(),
            ..NlwebReport::default()
        });
    };

    let json = serde_json::from_str::<Value>(&page.body).ok();
    let found = json.is_some();
    let schema_extensions = json
        .as_ref()
        .and_then(Value::as_object)
        .map(|obj| obj.keys().any(|k| k.to_ascii_lowercase().contains("schema")))
        .unwrap_or(false);

    Ok(NlwebReport {
        found,
        well_known_found: true,
        schema_extensions,
        score: if found { AGENT_READINESS_RULES.nlweb } else { 0.0 },
        detail: if found {
            format!("NLWeb discovery at {}", probe_url)
        } else {
            "NLWeb document is not valid JSON".to_string()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserAgentConfig;
    use crate::crawler::build_http_client;
    use std::time::Duration;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_agents_md_uppercase_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/AGENTS.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Agents\nUse the API."))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let report = check_agents_md(&client(), &server.uri()).await.unwrap();
        assert!(report.found);
        assert_eq!(report.score, 5.0);
        assert_eq!(report.url, Some(format!("{}/AGENTS.md", server.uri())));
    }

    #[tokio::test]
    async fn test_agents_md_soft_404_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<!DOCTYPE html><html></html>"))
            .mount(&server)
            .await;

        let report = check_agents_md(&client(), &server.uri()).await.unwrap();
        assert!(!report.found);
        assert_eq!(report.score, 0.0);
    }

    #[tokio::test]
    async fn test_markdown_accept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header_exists("accept"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("# Hi", "text/markdown; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let report = check_markdown_accept(&client(), &server.uri()).await.unwrap();
        assert!(report.supported);
        assert_eq!(report.score, 5.0);
    }

    #[tokio::test]
    async fn test_mcp_endpoint_counts_tools() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/mcp.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"name": "site", "tools": [{"name": "a"}, {"name": "b"}]}"#),
            )
            .mount(&server)
            .await;

        let report = check_mcp_endpoint(&client(), &server.uri()).await.unwrap();
        assert!(report.found);
        assert_eq!(report.tools_count, Some(2));
        assert_eq!(report.score, 4.0);
    }

    #[tokio::test]
    async fn test_x402_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(402))
            .mount(&server)
            .await;

        let report = check_x402(&client(), &server.uri()).await.unwrap();
        assert!(report.found);
        assert!(report.has_402_status);
        assert_eq!(report.score, 2.0);
    }

    #[tokio::test]
    async fn test_nlweb_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let report = check_nlweb(&client(), &server.uri()).await.unwrap();
        assert!(!report.found);
        assert_eq!(report.score, 0.0);
    }
}
