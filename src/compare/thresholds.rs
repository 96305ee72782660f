use crate::report::ScoreView;
use crate::scoring::Pillar;
use serde::{Deserialize, Serialize};

/// Minimum scores and requirements a report must meet
///
/// Every numeric field is optional; `None` means "not checked". Pillar
/// minimums apply to the raw pillar scores stored on the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuditPolicy {
    pub robots_min: Option<f64>,
    pub schema_min: Option<f64>,
    pub content_min: Option<f64>,
    pub llms_min: Option<f64>,
    pub overall_min: Option<f64>,
    /// Ceiling on the context waste percentage
    pub max_context_waste: Option<f64>,
    pub require_llms_txt: bool,
    /// Fails when any evaluated AI bot is blocked
    pub require_bot_access: bool,
}

impl AuditPolicy {
    /// True when no field would be evaluated
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A single unmet policy requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdFailure {
    pub pillar: String,
    pub actual: f64,
    /// Required value; for `context_waste` this is the ceiling
    pub minimum: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    pub passed: bool,
    pub failures: Vec<ThresholdFailure>,
}

/// Checks a report against a policy
pub fn check_thresholds(report: &dyn ScoreView, policy: &AuditPolicy) -> ThresholdResult {
    let mut failures = Vec::new();

    let minimums = [
        (Pillar::Robots.name(), policy.robots_min, report.robots().score),
        (Pillar::SchemaOrg.name(), policy.schema_min, report.schema_org().score),
        (Pillar::Content.name(), policy.content_min, report.content().score),
        (Pillar::LlmsTxt.name(), policy.llms_min, report.llms_txt().score),
        ("overall", policy.overall_min, report.overall_score()),
    ];

    for (pillar, minimum, actual) in minimums {
        if let Some(minimum) = minimum {
            if actual < minimum {
                failures.push(ThresholdFailure {
                    pillar: pillar.to_string(),
                    actual,
                    minimum,
                });
            }
        }
    }

    if let Some(ceiling) = policy.max_context_waste {
        let waste = report.content().context_waste_pct;
        if waste > ceiling {
            failures.push(ThresholdFailure {
                pillar: "context_waste".to_string(),
                actual: waste,
                minimum: ceiling,
            });
        }
    }

    if policy.require_llms_txt && !report.llms_txt().any_found() {
        failures.push(ThresholdFailure {
            pillar: "llms_txt_required".to_string(),
            actual: 0.0,
            minimum: 1.0,
        });
    }

    if policy.require_bot_access {
        let robots = report.robots();
        if !robots.blocked_bots().is_empty() {
            failures.push(ThresholdFailure {
                pillar: "bot_access_required".to_string(),
                actual: robots.allowed_count() as f64,
                minimum: robots.bots.len() as f64,
            });
        }
    }

    ThresholdResult {
        passed: failures.is_empty(),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{AuditReport, BotAccess};

    fn report() -> AuditReport {
        let mut report = AuditReport {
            url: "https://example.com".to_string(),
            overall_score: 55.0,
            ..AuditReport::default()
        };
        report.robots.found = true;
        report.robots.score = 12.5;
        report.robots.bots = vec![
            BotAccess {
                bot: "GPTBot".to_string(),
                allowed: true,
                detail: "Allowed".to_string(),
            },
            BotAccess {
                bot: "ClaudeBot".to_string(),
                allowed: false,
                detail: "Blocked by robots.txt".to_string(),
            },
        ];
        report.content.score = 30.0;
        report.content.context_waste_pct = 80.0;
        report
    }

    #[test]
    fn test_empty_policy_passes() {
        let policy = AuditPolicy::default();
        assert!(policy.is_empty());
        let result = check_thresholds(&report(), &policy);
        assert!(result.passed);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_pillar_minimums() {
        let policy = AuditPolicy {
            robots_min: Some(20.0),
            content_min: Some(25.0),
            overall_min: Some(60.0),
            ..AuditPolicy::default()
        };
        let result = check_thresholds(&report(), &policy);
        assert!(!result.passed);

        let failed: Vec<&str> = result.failures.iter().map(|f| f.pillar.as_str()).collect();
        assert_eq!(failed, vec!["robots", "overall"]);
        assert_eq!(result.failures[0].actual, 12.5);
        assert_eq!(result.failures[0].minimum, 20.0);
    }

    #[test]
    fn test_context_waste_ceiling() {
        let policy = AuditPolicy {
            max_context_waste: Some(70.0),
            ..AuditPolicy::default()
        };
        let result = check_thresholds(&report(), &policy);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].pillar, "context_waste");
        assert_eq!(result.failures[0].actual, 80.0);
    }

    #[test]
    fn test_requirements() {
        let policy = AuditPolicy {
            require_llms_txt: true,
            require_bot_access: true,
            ..AuditPolicy::default()
        };
        let result = check_thresholds(&report(), &policy);
        let failed: Vec<&str> = result.failures.iter().map(|f| f.pillar.as_str()).collect();
        assert_eq!(failed, vec!["llms_txt_required", "bot_access_required"]);
    }

    #[test]
    fn test_policy_from_toml_keys() {
        let policy: AuditPolicy = toml::from_str(
            r#"
schema-min = 10.0
require-bot-access = true
"#,
        )
        .unwrap();
        assert_eq!(policy.schema_min, Some(10.0));
        assert!(policy.require_bot_access);
        assert!(policy.robots_min.is_none());
    }
}
