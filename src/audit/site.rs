//! Multi-page site audits

use super::aggregate::{aggregate_page_scores, audit_page_content};
use super::{page_text, recover, AuditOptions, Auditor, FanOut, SiteWide};
use crate::discovery::discover_pages;
use crate::probes::{analyze_semantic_html, check_eeat, check_rsl};
use crate::report::{
    ContentReport, DiscoveryMethod, DiscoveryResult, LlmsTxtReport, PageAudit, RobotsReport,
    SchemaReport, SiteAuditReport,
};
use crate::scoring::{
    compute_lint_results, overall_score, score_llms_txt, score_robots, RawScores, ScoringVersion,
};
use crate::url::{extract_domain, netloc, parse_audit_url};
use crate::Result;
use tracing::{debug, info, warn};
use url::Url;

fn no_progress(_: &str) {}

impl Auditor {
    /// Audits a seed page plus sampled pages of the same site
    ///
    /// Only a malformed URL is an error. When the site deadline expires the
    /// in-flight work is dropped and a zero-scored report marked as timed out
    /// is returned instead.
    pub async fn audit_site(&self, url: &str, options: &AuditOptions) -> Result<SiteAuditReport> {
        self.audit_site_with_progress(url, options, &no_progress).await
    }

    /// Like [`Auditor::audit_site`], reporting each phase through `progress`
    pub async fn audit_site_with_progress(
        &self,
        url: &str,
        options: &AuditOptions,
        progress: &(dyn Fn(&str) + Send + Sync),
    ) -> Result<SiteAuditReport> {
        let parsed = parse_audit_url(url)?;
        let domain = netloc(&parsed);

        match tokio::time::timeout(
            self.site_deadline,
            self.run_site(url, &parsed, &domain, options, progress),
        )
        .await
        {
            Ok(report) => Ok(report),
            Err(_) => {
                warn!(
                    "Site audit of {} exceeded {}s deadline",
                    url,
                    self.site_deadline.as_secs()
                );
                Ok(timed_out_report(
                    url,
                    &domain,
                    options.scoring,
                    self.site_deadline.as_secs(),
                ))
            }
        }
    }

    async fn run_site(
        &self,
        url: &str,
        parsed: &Url,
        domain: &str,
        options: &AuditOptions,
        progress: &(dyn Fn(&str) + Send + Sync),
    ) -> SiteAuditReport {
        progress("Running site-wide checks...");
        let FanOut { site, page, agent } = self.fan_out(url, options).await;

        let mut errors = Vec::new();
        let SiteWide {
            mut robots,
            raw_robots,
            mut llms_txt,
            content_usage,
        } = site.recover(&mut errors);
        let seed = recover(page, "Seed crawl", &mut errors);

        progress("Discovering pages...");
        let seed_links: &[String] = match &seed {
            Some(seed) if seed.success => &seed.internal_links,
            _ => &[],
        };
        let discovery = discover_pages(
            self.probes.as_ref(),
            url,
            raw_robots.as_deref(),
            seed_links,
            options.max_pages,
            options.timeout,
        )
        .await;

        let (seed_html, seed_markdown) = page_text(seed.as_ref());
        let agent_readiness = agent.into_report(analyze_semantic_html(seed_html), &mut errors);

        let mut pages = Vec::new();
        match &seed {
            Some(seed) if seed.success => {
                pages.push(audit_page_content(url, seed_html, seed_markdown));
            }
            Some(seed) => errors.push(format!(
                "Seed crawl error: {}",
                seed.error.as_deref().unwrap_or("Unknown crawl error")
            )),
            None => {}
        }

        let remaining: Vec<String> = discovery
            .urls_sampled
            .iter()
            .filter(|sampled| sampled.as_str() != url)
            .cloned()
            .collect();

        if !remaining.is_empty() {
            progress(&format!("Crawling {} additional pages...", remaining.len()));
            let results = self.probes.extract_pages(&remaining, options.delay).await;
            let total = discovery.urls_sampled.len();

            for (i, result) in results.into_iter().enumerate() {
                progress(&format!("Auditing page {}/{}...", i + 2, total));
                if result.success {
                    pages.push(audit_page_content(&result.url, &result.html, &result.markdown));
                } else {
                    debug!("Page {} failed: {:?}", result.url, result.error);
                    pages.push(PageAudit {
                        url: result.url,
                        schema_org: SchemaReport::with_detail("Crawl failed"),
                        content: ContentReport::with_detail("Crawl failed"),
                        errors: vec![result
                            .error
                            .unwrap_or_else(|| "Unknown crawl error".to_string())],
                    });
                }
            }
        }

        score_robots(&mut robots);
        score_llms_txt(&mut llms_txt);

        let pages_failed = pages.iter().filter(|p| !p.errors.is_empty()).count();
        let (schema_org, content, _) = aggregate_page_scores(&pages, &robots, &llms_txt);

        let raw = RawScores {
            robots: robots.score,
            llms_txt: llms_txt.score,
            schema_org: schema_org.score,
            content: content.score,
        };
        let overall = overall_score(options.scoring, raw, Some(agent_readiness.score));
        let lint_result = compute_lint_results(
            &robots,
            &llms_txt,
            &schema_org,
            &content,
            options.scoring,
            Some(&agent_readiness),
        );

        let rsl = check_rsl(raw_robots.as_deref());
        let host = extract_domain(parsed).unwrap_or_default();
        let eeat = check_eeat(seed_html, &host);

        info!(
            "Site audit of {} complete: {} pages ({} failed), overall {}",
            url,
            pages.len(),
            pages_failed,
            overall
        );

        SiteAuditReport {
            url: url.to_string(),
            domain: domain.to_string(),
            scoring_version: options.scoring,
            overall_score: overall,
            robots,
            llms_txt,
            schema_org,
            content,
            lint_result: Some(lint_result),
            rsl: Some(rsl),
            content_usage,
            eeat: Some(eeat),
            agent_readiness: Some(agent_readiness),
            discovery,
            pages_audited: pages.len(),
            pages_failed,
            pages,
            errors,
        }
    }
}

/// Degraded report returned when the site deadline expires
fn timed_out_report(
    url: &str,
    domain: &str,
    scoring_version: ScoringVersion,
    deadline_secs: u64,
) -> SiteAuditReport {
    SiteAuditReport {
        url: url.to_string(),
        domain: domain.to_string(),
        scoring_version,
        overall_score: 0.0,
        robots: RobotsReport::with_detail("Timed out"),
        llms_txt: LlmsTxtReport::with_detail("Timed out"),
        schema_org: SchemaReport::with_detail("Timed out"),
        content: ContentReport::with_detail("Timed out"),
        discovery: DiscoveryResult {
            method: DiscoveryMethod::Timeout,
            detail: "Timed out".to_string(),
            ..DiscoveryResult::default()
        },
        errors: vec![format!(
            "Audit timed out after {}s, returning partial results",
            deadline_secs
        )],
        ..SiteAuditReport::default()
    }
}
