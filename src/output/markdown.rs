//! Markdown report rendering
//!
//! Scores are shown on the report's own scheme: raw pillar scores are
//! rescaled onto the scheme's maxima so the rows add up to the overall.

use crate::audit::BatchReport;
use crate::report::{AnyReport, ScoreView, SiteAuditReport};
use crate::scoring::{agent_readiness_maxima, Pillar};

/// Formats any report as markdown
pub fn format_markdown(report: &AnyReport) -> String {
    match report {
        AnyReport::Single(report) => format_report_markdown(report),
        AnyReport::Site(report) => format_site_markdown(report),
    }
}

/// Formats the scored parts shared by single-page and site reports
pub fn format_report_markdown(report: &dyn ScoreView) -> String {
    let mut md = String::new();
    let scheme = report.scoring_version().scheme();

    md.push_str(&format!("# Context Lint Report: {}\n\n", report.url()));
    md.push_str(&format!("- **Scoring**: {}\n", report.scoring_version()));
    md.push_str(&format!(
        "- **Overall Score**: {:.1}/{}\n\n",
        report.overall_score(),
        scheme.total()
    ));

    // Pillars
    md.push_str("## Pillars\n\n");
    md.push_str("| Pillar | Score | Max | Detail |\n");
    md.push_str("|--------|-------|-----|--------|\n");
    let rows = [
        (Pillar::Robots, "Robots", report.robots().score, &report.robots().detail),
        (Pillar::LlmsTxt, "llms.txt", report.llms_txt().score, &report.llms_txt().detail),
        (
            Pillar::SchemaOrg,
            "Schema.org",
            report.schema_org().score,
            &report.schema_org().detail,
        ),
        (Pillar::Content, "Content", report.content().score, &report.content().detail),
    ];
    for (pillar, label, raw, detail) in rows {
        md.push_str(&format!(
            "| {} | {:.1} | {} | {} |\n",
            label,
            scheme.rescale(pillar, raw),
            scheme.max_for(pillar),
            escape_cell(detail)
        ));
    }
    if let Some(agent) = report.agent_readiness() {
        if scheme.agent_readiness_max > 0.0 {
            md.push_str(&format!(
                "| Agent Readiness | {:.1} | {} | {} |\n",
                agent.score,
                scheme.agent_readiness_max,
                escape_cell(&agent.detail)
            ));
        }
    }
    md.push('\n');

    // Lint checks
    if let Some(lint) = report.lint_result() {
        md.push_str("## Lint Checks\n\n");
        md.push_str("| Check | Result | Detail |\n");
        md.push_str("|-------|--------|--------|\n");
        for check in &lint.checks {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                check.name,
                check.severity,
                escape_cell(&check.detail)
            ));
        }
        md.push_str(&format!(
            "\n**Lint**: {}\n\n",
            if lint.passed { "passed" } else { "warnings" }
        ));
    }

    // Agent readiness breakdown
    if let Some(agent) = report.agent_readiness() {
        md.push_str("## Agent Readiness Signals\n\n");
        md.push_str("| Signal | Score | Max |\n");
        md.push_str("|--------|-------|-----|\n");
        for ((name, score), (_, max)) in agent.sub_scores().iter().zip(agent_readiness_maxima()) {
            md.push_str(&format!("| {} | {:.1} | {} |\n", name, score, max));
        }
        md.push('\n');
    }

    if !report.errors().is_empty() {
        md.push_str("## Errors\n\n");
        for error in report.errors() {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }

    md
}

/// Formats a site report: the shared sections plus discovery and pages
pub fn format_site_markdown(report: &SiteAuditReport) -> String {
    let mut md = format_report_markdown(report);

    md.push_str("## Discovery\n\n");
    md.push_str(&format!("- **Domain**: {}\n", report.domain));
    md.push_str(&format!("- **Method**: {}\n", report.discovery.method));
    md.push_str(&format!(
        "- **URLs Found**: {}\n",
        report.discovery.urls_found_total
    ));
    md.push_str(&format!(
        "- **Pages Audited**: {} ({} failed)\n\n",
        report.pages_audited, report.pages_failed
    ));

    if !report.pages.is_empty() {
        md.push_str("## Pages\n\n");
        md.push_str("| URL | Schema | Content | Words | Status |\n");
        md.push_str("|-----|--------|---------|-------|--------|\n");
        for page in &report.pages {
            let status = if page.errors.is_empty() {
                "ok".to_string()
            } else {
                escape_cell(&page.errors.join("; "))
            };
            md.push_str(&format!(
                "| {} | {:.1} | {:.1} | {} | {} |\n",
                page.url, page.schema_org.score, page.content.score, page.content.word_count, status
            ));
        }
        md.push('\n');
    }

    md
}

/// Formats a batch as a score table plus the failed URLs
pub fn format_batch_markdown(batch: &BatchReport) -> String {
    let mut md = String::new();

    md.push_str("# Context Lint Batch Report\n\n");
    md.push_str(&format!("- **Audited**: {}\n", batch.reports.len()));
    md.push_str(&format!("- **Failed**: {}\n\n", batch.errors.len()));

    if !batch.reports.is_empty() {
        md.push_str("| URL | Mode | Overall | Errors |\n");
        md.push_str("|-----|------|---------|--------|\n");
        for entry in &batch.reports {
            let mode = match entry.report {
                AnyReport::Single(_) => "single",
                AnyReport::Site(_) => "site",
            };
            let view = entry.report.view();
            md.push_str(&format!(
                "| {} | {} | {:.1} | {} |\n",
                entry.url,
                mode,
                view.overall_score(),
                view.errors().len()
            ));
        }
        md.push('\n');
    }

    if !batch.errors.is_empty() {
        md.push_str("## Failed URLs\n\n");
        for failure in &batch.errors {
            md.push_str(&format!("- `{}`: {}\n", failure.url, failure.error));
        }
        md.push('\n');
    }

    md
}

/// Keeps pipes and newlines from breaking a table row
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
