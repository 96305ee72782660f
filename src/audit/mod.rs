//! Audit orchestration
//!
//! The [`Auditor`] fans out the independent probes concurrently, isolates
//! their failures, runs the page-derived analyzers once extraction resolves,
//! and scores the result. Site audits add page discovery, per-page scoring
//! and aggregation under a hard overall deadline. The batch runner drives
//! many audits under a concurrency limit.

mod aggregate;
mod batch;
mod options;
mod site;

pub use aggregate::{aggregate_page_scores, audit_page_content, page_weight};
pub use batch::{run_batch, AuditMode, BatchEntry, BatchFailure, BatchReport};
pub use options::AuditOptions;

use crate::config::Config;
use crate::crawler::CrawlResult;
use crate::probes::{
    analyze_content, analyze_semantic_html, check_eeat, check_rsl, parse_structured_data,
    HttpProbes, ProbeError, ProbeResult, Probes,
};
use crate::report::{
    AgentReadinessReport, AgentsMdReport, AuditReport, ContentUsageReport, LlmsTxtReport,
    MarkdownAcceptReport, McpEndpointReport, NlwebReport, RobotsReport, SemanticHtmlReport,
    X402Report,
};
use crate::scoring::{apply_token_metrics, compute_agent_readiness, compute_lint_results, compute_scores};
use crate::url::{extract_domain, parse_audit_url};
use crate::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Default wall-clock ceiling for a whole site audit
pub const DEFAULT_SITE_DEADLINE: Duration = Duration::from_secs(90);

/// Runs audits against a set of probes
#[derive(Clone)]
pub struct Auditor {
    probes: Arc<dyn Probes>,
    site_deadline: Duration,
}

impl Auditor {
    pub fn new(probes: Arc<dyn Probes>) -> Self {
        Self {
            probes,
            site_deadline: DEFAULT_SITE_DEADLINE,
        }
    }

    /// Builds an auditor backed by HTTP probes from the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let probes = HttpProbes::new(
            &config.user_agent,
            Duration::from_secs(config.audit.timeout_seconds),
        )?;
        Ok(Self::new(Arc::new(probes))
            .with_site_deadline(Duration::from_secs(config.audit.site_deadline_seconds)))
    }

    pub fn with_site_deadline(mut self, deadline: Duration) -> Self {
        self.site_deadline = deadline;
        self
    }

    pub fn site_deadline(&self) -> Duration {
        self.site_deadline
    }

    /// Audits a single page
    ///
    /// Only a malformed URL is an error. Probe failures and timeouts are
    /// recorded in the report's `errors` and replaced by default reports.
    pub async fn audit_url(&self, url: &str, options: &AuditOptions) -> Result<AuditReport> {
        let parsed = parse_audit_url(url)?;
        info!("Auditing {}", url);

        let FanOut {
            site,
            page,
            agent,
        } = self.fan_out(url, options).await;

        let mut errors = Vec::new();
        let SiteWide {
            mut robots,
            raw_robots,
            mut llms_txt,
            content_usage,
        } = site.recover(&mut errors);

        let crawl = recover(page, "Crawl", &mut errors);
        if let Some(CrawlResult {
            success: false,
            error: Some(error),
            ..
        }) = &crawl
        {
            errors.push(format!("Crawl error: {}", error));
        }
        let (html, markdown) = page_text(crawl.as_ref());

        let mut schema_org = parse_structured_data(html);
        let mut content = analyze_content(markdown);
        apply_token_metrics(&mut content, html, markdown);

        let agent_readiness = agent.into_report(analyze_semantic_html(html), &mut errors);

        let rsl = check_rsl(raw_robots.as_deref());
        let domain = extract_domain(&parsed).unwrap_or_default();
        let eeat = check_eeat(html, &domain);

        let overall_score = compute_scores(
            &mut robots,
            &mut llms_txt,
            &mut schema_org,
            &mut content,
            options.scoring,
            Some(&agent_readiness),
        );
        let lint_result = compute_lint_results(
            &robots,
            &llms_txt,
            &schema_org,
            &content,
            options.scoring,
            Some(&agent_readiness),
        );

        info!(
            "Audit of {} complete: overall {} ({} errors)",
            url,
            overall_score,
            errors.len()
        );

        Ok(AuditReport {
            url: url.to_string(),
            scoring_version: options.scoring,
            overall_score,
            robots,
            llms_txt,
            schema_org,
            content,
            lint_result: Some(lint_result),
            rsl: Some(rsl),
            content_usage,
            eeat: Some(eeat),
            agent_readiness: Some(agent_readiness),
            errors,
        })
    }

    /// Runs every independent probe concurrently, each under the per-probe timeout
    async fn fan_out(&self, url: &str, options: &AuditOptions) -> FanOut {
        let probes = self.probes.as_ref();
        let limit = options.timeout;
        let bots = options.bot_list();

        let (robots, llms_txt, content_usage, page, agents_md, markdown_accept, mcp_endpoint, x402, nlweb) = tokio::join!(
            bounded(limit, probes.robots(url, &bots)),
            bounded(limit, probes.llms_txt(url)),
            bounded(limit, probes.content_usage(url)),
            bounded(limit, probes.extract_page(url)),
            bounded(limit, probes.agents_md(url)),
            bounded(limit, probes.markdown_accept(url)),
            bounded(limit, probes.mcp_endpoint(url)),
            bounded(limit, probes.x402(url)),
            bounded(limit, probes.nlweb(url)),
        );

        FanOut {
            site: SiteProbeResults {
                robots,
                llms_txt,
                content_usage,
            },
            page,
            agent: AgentProbeResults {
                agents_md,
                markdown_accept,
                mcp_endpoint,
                x402,
                nlweb,
            },
        }
    }
}

/// Results of one concurrent probe fan-out, positionally associated
struct FanOut {
    site: SiteProbeResults,
    page: ProbeResult<CrawlResult>,
    agent: AgentProbeResults,
}

struct SiteProbeResults {
    robots: ProbeResult<(RobotsReport, Option<String>)>,
    llms_txt: ProbeResult<LlmsTxtReport>,
    content_usage: ProbeResult<ContentUsageReport>,
}

/// Site-wide reports after failure recovery
struct SiteWide {
    robots: RobotsReport,
    raw_robots: Option<String>,
    llms_txt: LlmsTxtReport,
    content_usage: Option<ContentUsageReport>,
}

impl SiteProbeResults {
    fn recover(self, errors: &mut Vec<String>) -> SiteWide {
        let (robots, raw_robots) = match recover(self.robots, "Robots check", errors) {
            Some((robots, raw)) => (robots, raw),
            None => (RobotsReport::with_detail("Check failed"), None),
        };
        let llms_txt = recover(self.llms_txt, "llms.txt check", errors)
            .unwrap_or_else(|| LlmsTxtReport::with_detail("Check failed"));
        let content_usage = recover(self.content_usage, "Content-Usage check", errors);

        SiteWide {
            robots,
            raw_robots,
            llms_txt,
            content_usage,
        }
    }
}

struct AgentProbeResults {
    agents_md: ProbeResult<AgentsMdReport>,
    markdown_accept: ProbeResult<MarkdownAcceptReport>,
    mcp_endpoint: ProbeResult<McpEndpointReport>,
    x402: ProbeResult<X402Report>,
    nlweb: ProbeResult<NlwebReport>,
}

impl AgentProbeResults {
    /// Builds the scored agent readiness report; failed sub-checks score zero
    fn into_report(
        self,
        semantic_html: SemanticHtmlReport,
        errors: &mut Vec<String>,
    ) -> AgentReadinessReport {
        let mut report = AgentReadinessReport {
            agents_md: recover(self.agents_md, "AGENTS.md check", errors).unwrap_or_default(),
            markdown_accept: recover(self.markdown_accept, "Markdown accept check", errors)
                .unwrap_or_default(),
            mcp_endpoint: recover(self.mcp_endpoint, "MCP endpoint check", errors)
                .unwrap_or_default(),
            semantic_html,
            x402: recover(self.x402, "x402 check", errors).unwrap_or_default(),
            nlweb: recover(self.nlweb, "NLWeb check", errors).unwrap_or_default(),
            ..AgentReadinessReport::default()
        };
        compute_agent_readiness(&mut report);
        report
    }
}

/// Bounds a probe by `limit`; expiry becomes a probe timeout error
async fn bounded<T>(limit: Duration, probe: impl Future<Output = ProbeResult<T>>) -> ProbeResult<T> {
    match tokio::time::timeout(limit, probe).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout(limit)),
    }
}

/// Unwraps a probe result, recording `"{label} failed: {error}"` on failure
fn recover<T>(result: ProbeResult<T>, label: &str, errors: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} failed: {}", label, e);
            errors.push(format!("{} failed: {}", label, e));
            None
        }
    }
}

/// HTML and markdown of a successful extraction, or empty strings
fn page_text(crawl: Option<&CrawlResult>) -> (&str, &str) {
    match crawl {
        Some(crawl) if crawl.success => (crawl.html.as_str(), crawl.markdown.as_str()),
        _ => ("", ""),
    }
}
