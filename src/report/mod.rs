//! Report types produced by audits
//!
//! Every type here is a plain value: created once per audit, filled in by a
//! single stage, then serialized. Field names are stable because history
//! rows and baseline files are stored as JSON.

mod agent;
mod pillars;
mod signals;

pub use agent::{
    AgentReadinessReport, AgentsMdReport, MarkdownAcceptReport, McpEndpointReport, NlwebReport,
    SemanticHtmlReport, X402Report,
};
pub use pillars::{
    BotAccess, ContentReport, LlmsTxtReport, RobotsReport, SchemaOrgBlock, SchemaReport,
};
pub use signals::{ContentUsageReport, EeatReport, RslReport};

use crate::scoring::ScoringVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a lint check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Pass,
    Warn,
}

impl Severity {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Self::Pass
        } else {
            Self::Warn
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Warn => write!(f, "warn"),
        }
    }
}

/// A single pass/warn lint check
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintCheck {
    pub name: String,
    pub passed: bool,
    pub severity: Severity,
    pub detail: String,
}

/// All lint checks plus the token-waste figures they were derived from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintResult {
    pub checks: Vec<LintCheck>,
    pub context_waste_pct: f64,
    pub raw_tokens: usize,
    pub clean_tokens: usize,
    pub passed: bool,
}

/// Page-local results for one sampled page of a site audit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageAudit {
    pub url: String,
    pub schema_org: SchemaReport,
    pub content: ContentReport,
    pub errors: Vec<String>,
}

impl PageAudit {
    /// Pages with no errors, or with any extracted words, count toward aggregation
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty() || self.content.word_count > 0
    }
}

/// How the sampled pages of a site audit were found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMethod {
    Sitemap,
    Spider,
    Timeout,
    #[default]
    None,
}

impl fmt::Display for DiscoveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sitemap => "sitemap",
            Self::Spider => "spider",
            Self::Timeout => "timeout",
            Self::None => "none",
        };
        write!(f, "{}", name)
    }
}

/// Result of page discovery for a site audit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryResult {
    pub method: DiscoveryMethod,
    /// Seed first, deduplicated, never longer than the page budget
    pub urls_sampled: Vec<String>,
    pub urls_found_total: usize,
    pub detail: String,
}

/// Result of auditing a single page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditReport {
    pub url: String,
    pub scoring_version: ScoringVersion,
    pub overall_score: f64,
    pub robots: RobotsReport,
    pub llms_txt: LlmsTxtReport,
    pub schema_org: SchemaReport,
    pub content: ContentReport,
    pub lint_result: Option<LintResult>,
    pub rsl: Option<RslReport>,
    pub content_usage: Option<ContentUsageReport>,
    pub eeat: Option<EeatReport>,
    pub agent_readiness: Option<AgentReadinessReport>,
    pub errors: Vec<String>,
}

/// Result of auditing a seed page plus sampled pages of the same site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteAuditReport {
    pub url: String,
    pub domain: String,
    pub scoring_version: ScoringVersion,
    pub overall_score: f64,
    pub robots: RobotsReport,
    pub llms_txt: LlmsTxtReport,
    /// Aggregated across successful pages
    pub schema_org: SchemaReport,
    /// Aggregated across successful pages
    pub content: ContentReport,
    pub lint_result: Option<LintResult>,
    pub rsl: Option<RslReport>,
    pub content_usage: Option<ContentUsageReport>,
    pub eeat: Option<EeatReport>,
    pub agent_readiness: Option<AgentReadinessReport>,
    pub discovery: DiscoveryResult,
    pub pages: Vec<PageAudit>,
    pub pages_audited: usize,
    pub pages_failed: usize,
    pub errors: Vec<String>,
}

/// A report produced by either audit mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AnyReport {
    Single(AuditReport),
    Site(SiteAuditReport),
}

/// Read access to the scored parts of a report
///
/// Lets threshold checks, baselines, history and output treat single-page
/// and site reports alike.
pub trait ScoreView {
    fn url(&self) -> &str;
    fn scoring_version(&self) -> ScoringVersion;
    fn overall_score(&self) -> f64;
    fn robots(&self) -> &RobotsReport;
    fn llms_txt(&self) -> &LlmsTxtReport;
    fn schema_org(&self) -> &SchemaReport;
    fn content(&self) -> &ContentReport;
    fn agent_readiness(&self) -> Option<&AgentReadinessReport>;
    fn lint_result(&self) -> Option<&LintResult>;
    fn errors(&self) -> &[String];
}

macro_rules! impl_score_view {
    ($ty:ty) => {
        impl ScoreView for $ty {
            fn url(&self) -> &str {
                &self.url
            }
            fn scoring_version(&self) -> ScoringVersion {
                self.scoring_version
            }
            fn overall_score(&self) -> f64 {
                self.overall_score
            }
            fn robots(&self) -> &RobotsReport {
                &self.robots
            }
            fn llms_txt(&self) -> &LlmsTxtReport {
                &self.llms_txt
            }
            fn schema_org(&self) -> &SchemaReport {
                &self.schema_org
            }
            fn content(&self) -> &ContentReport {
                &self.content
            }
            fn agent_readiness(&self) -> Option<&AgentReadinessReport> {
                self.agent_readiness.as_ref()
            }
            fn lint_result(&self) -> Option<&LintResult> {
                self.lint_result.as_ref()
            }
            fn errors(&self) -> &[String] {
                &self.errors
            }
        }
    };
}

impl_score_view!(AuditReport);
impl_score_view!(SiteAuditReport);

impl AnyReport {
    /// Borrows the report behind the scored view
    pub fn view(&self) -> &dyn ScoreView {
        match self {
            Self::Single(report) => report,
            Self::Site(report) => report,
        }
    }
}
