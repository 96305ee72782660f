use crate::config::AuditConfig;
use crate::robots::default_bots;
use crate::scoring::ScoringVersion;
use crate::ConfigResult;
use std::time::Duration;

/// Runtime settings for one audit
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOptions {
    /// Shared per-probe timeout
    pub timeout: Duration,
    /// AI bots to evaluate; `None` uses the default list
    pub bots: Option<Vec<String>>,
    pub scoring: ScoringVersion,
    /// Page budget for site audits, seed included
    pub max_pages: usize,
    /// Pause between page fetches in site audits
    pub delay: Duration,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            bots: None,
            scoring: ScoringVersion::V2,
            max_pages: 10,
            delay: Duration::from_secs(1),
        }
    }
}

impl AuditOptions {
    /// Derives options from the `[audit]` configuration section
    pub fn from_config(config: &AuditConfig) -> ConfigResult<Self> {
        Ok(Self {
            timeout: Duration::from_secs(config.timeout_seconds),
            bots: config.bots.clone(),
            scoring: config.scoring_version.parse()?,
            max_pages: config.max_pages,
            delay: Duration::try_from_secs_f64(config.delay_seconds).unwrap_or_default(),
        })
    }

    /// The bots to evaluate against robots.txt
    pub fn bot_list(&self) -> Vec<String> {
        self.bots.clone().unwrap_or_else(default_bots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let options = AuditOptions::from_config(&AuditConfig::default()).unwrap();
        assert_eq!(options, AuditOptions::default());
        assert_eq!(options.bot_list().len(), 13);
    }

    #[test]
    fn test_from_config_overrides() {
        let config = AuditConfig {
            scoring_version: "v3".to_string(),
            delay_seconds: 0.25,
            bots: Some(vec!["GPTBot".to_string()]),
            ..AuditConfig::default()
        };
        let options = AuditOptions::from_config(&config).unwrap();
        assert_eq!(options.scoring, ScoringVersion::V3);
        assert_eq!(options.delay, Duration::from_millis(250));
        assert_eq!(options.bot_list(), vec!["GPTBot".to_string()]);
    }

    #[test]
    fn test_from_config_rejects_unknown_version() {
        let config = AuditConfig {
            scoring_version: "v1".to_string(),
            ..AuditConfig::default()
        };
        assert!(AuditOptions::from_config(&config).is_err());
    }
}
