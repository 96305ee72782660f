use crate::compare::AuditPolicy;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Context-Lint
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub audit: AuditConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub policy: AuditPolicy,
    pub history: HistoryConfig,
}

/// Audit behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Per-probe timeout (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Maximum number of pages sampled in a site audit
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Delay between page fetches in a site audit (seconds)
    #[serde(rename = "delay-seconds")]
    pub delay_seconds: f64,

    /// Number of audits run in parallel in batch mode
    pub concurrency: usize,

    /// Scoring scheme version ("v2" or "v3")
    #[serde(rename = "scoring-version")]
    pub scoring_version: String,

    /// AI bot user agents to evaluate against robots.txt
    pub bots: Option<Vec<String>>,

    /// Hard wall-clock ceiling for a whole site audit (seconds)
    #[serde(rename = "site-deadline-seconds")]
    pub site_deadline_seconds: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
            max_pages: 10,
            delay_seconds: 1.0,
            concurrency: 3,
            scoring_version: "v2".to_string(),
            bots: None,
            site_deadline_seconds: 90,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name sent in the User-Agent header
    pub name: String,

    /// Version sent in the User-Agent header
    pub version: String,

    /// URL with information about the auditor
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "ContextLint".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/context-lint/context-lint".to_string(),
        }
    }
}

/// Audit history configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Path to the SQLite history database
    #[serde(rename = "database-path")]
    pub database_path: Option<PathBuf>,

    /// Score drop (in points) that counts as a regression
    #[serde(rename = "regression-threshold")]
    pub regression_threshold: f64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            regression_threshold: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.audit.timeout_seconds, 15);
        assert_eq!(config.audit.max_pages, 10);
        assert_eq!(config.audit.scoring_version, "v2");
        assert_eq!(config.audit.site_deadline_seconds, 90);
        assert_eq!(config.user_agent.name, "ContextLint");
        assert_eq!(config.history.regression_threshold, 5.0);
        assert!(config.policy.overall_min.is_none());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[audit]
max-pages = 25
bots = ["GPTBot"]
"#,
        )
        .unwrap();
        assert_eq!(config.audit.max_pages, 25);
        assert_eq!(config.audit.concurrency, 3);
        assert_eq!(config.audit.bots, Some(vec!["GPTBot".to_string()]));
    }
}
