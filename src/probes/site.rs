//! Site-wide HTTP probes: robots.txt, llms.txt and the Content-Usage header

use super::error::{ProbeError, ProbeResult};
use super::signals::parse_content_usage;
use crate::crawler::fetch_optional;
use crate::report::{ContentUsageReport, LlmsTxtReport, RobotsReport};
use crate::robots::build_robots_report;
use crate::url::origin_of;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Canonical llms.txt locations, probed in order
const LLMS_TXT_PATHS: &[&str] = &["/llms.txt", "/.well-known/llms.txt"];

const LLMS_FULL_PATH: &str = "/llms-full.txt";

pub(crate) fn origin(url: &str) -> ProbeResult<String> {
    let parsed = Url::parse(url)?;
    if parsed.host_str().is_none() {
        return Err(ProbeError::Failed(format!("URL has no host: {}", url)));
    }
    Ok(origin_of(&parsed))
}

/// Fetches robots.txt and evaluates each bot against the site root
///
/// Returns the unscored report and the raw body (for discovery and RSL).
pub async fn check_robots(
    client: &Client,
    url: &str,
    bots: &[String],
) -> ProbeResult<(RobotsReport, Option<String>)> {
    let origin = origin(url)?;
    let robots_url = format!("{}/robots.txt", origin);

    let body = fetch_optional(client, &robots_url).await?.map(|page| page.body);
    let report = build_robots_report(body.as_deref(), bots, &origin);
    Ok((report, body))
}

async fn probe_text(client: &Client, url: &str) -> Option<String> {
    match fetch_optional(client, url).await {
        Ok(Some(page)) if !page.body.trim().is_empty() => Some(page.body),
        Ok(_) => None,
        Err(e) => {
            debug!("Probe of {} failed: {}", url, e);
            None
        }
    }
}

/// Probes the llms.txt locations and llms-full.txt
///
/// A location counts when it answers 200 with a non-empty body.
pub async fn check_llms_txt(client: &Client, url: &str) -> ProbeResult<LlmsTxtReport> {
    let origin = origin(url)?;
    let mut report = LlmsTxtReport::default();

    for path in LLMS_TXT_PATHS {
        let probe_url = format!("{}{}", origin, path);
        if probe_text(client, &probe_url).await.is_some() {
            report.found = true;
            report.url = Some(probe_url);
            break;
        }
    }

    let full_url = format!("{}{}", origin, LLMS_FULL_PATH);
    if probe_text(client, &full_url).await.is_some() {
        report.llms_full_found = true;
        report.llms_full_url = Some(full_url);
    }

    report.detail = match (&report.url, &report.llms_full_url) {
        (Some(url), Some(_)) => format!("Found at {} (llms-full.txt also present)", url),
        (Some(url), None) => format!("Found at {}", url),
        (None, Some(full)) => format!("llms-full.txt found at {}", full),
        (None, None) => "llms.txt not found".to_string(),
    };

    Ok(report)
}

/// Reads the `Content-Usage` header of the page response
pub async fn check_content_usage(client: &Client, url: &str) -> ProbeResult<ContentUsageReport> {
    let response = client.get(url).send().await?;
    let header = response
        .headers()
        .get("content-usage")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Ok(parse_content_usage(header.as_deref()))
}
