use super::{compare, pillar_scores, score_snapshot, RegressionResult};
use crate::report::ScoreView;
use crate::scoring::ScoringVersion;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A saved snapshot of a report's scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    /// Scheme the overall score was computed under; pillar scores are raw
    #[serde(default)]
    pub scoring_version: ScoringVersion,
    pub overall: f64,
    pub scores: BTreeMap<String, f64>,
}

impl Baseline {
    /// Captures the scores of a report as of now
    pub fn from_report(report: &dyn ScoreView) -> Self {
        Self {
            url: report.url().to_string(),
            timestamp: Utc::now(),
            scoring_version: report.scoring_version(),
            overall: report.overall_score(),
            scores: pillar_scores(report),
        }
    }

    /// Writes the baseline as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!("Saved baseline for {} to {}", self.url, path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Compares a fresh report against a saved baseline
///
/// The overall score is compared alongside the pillars, under `overall`,
/// but only when both were scored under the same scheme.
pub fn compare_baseline(
    report: &dyn ScoreView,
    baseline: &Baseline,
    threshold: f64,
) -> RegressionResult {
    let mut previous = baseline.scores.clone();
    if baseline.scoring_version == report.scoring_version() {
        previous.insert("overall".to_string(), baseline.overall);
    } else {
        debug!(
            "Baseline scored under {}, report under {}; skipping overall",
            baseline.scoring_version,
            report.scoring_version()
        );
    }

    compare(&previous, &score_snapshot(report), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::AuditReport;
    use tempfile::TempDir;

    fn report(content: f64, overall: f64) -> AuditReport {
        let mut report = AuditReport {
            url: "https://example.com".to_string(),
            overall_score: overall,
            ..AuditReport::default()
        };
        report.content.score = content;
        report.robots.score = 25.0;
        report
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("baseline.json");

        let baseline = Baseline::from_report(&report(30.0, 60.0));
        baseline.save(&path).unwrap();

        let loaded = Baseline::load(&path).unwrap();
        assert_eq!(loaded, baseline);
        assert_eq!(loaded.scores["content"], 30.0);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Baseline::load(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_compare_baseline_detects_content_drop() {
        let baseline = Baseline::from_report(&report(30.0, 60.0));
        let result = compare_baseline(&report(20.0, 50.0), &baseline, 5.0);

        assert!(result.has_regression);
        let regressed: Vec<&str> = result.regressions().map(|p| p.pillar.as_str()).collect();
        assert_eq!(regressed, vec!["content", "overall"]);
    }

    #[test]
    fn test_compare_baseline_improvement_passes() {
        let baseline = Baseline::from_report(&report(20.0, 50.0));
        let result = compare_baseline(&report(30.0, 60.0), &baseline, 5.0);
        assert!(result.passed);
    }

    #[test]
    fn test_scheme_change_skips_overall() {
        let baseline = Baseline::from_report(&report(30.0, 75.0));
        let mut current = report(30.0, 60.0);
        current.scoring_version = ScoringVersion::V3;

        let result = compare_baseline(&current, &baseline, 5.0);

        assert!(result.passed);
        assert!(result.pillars.iter().all(|p| p.pillar != "overall"));
        assert!(result.pillars.iter().any(|p| p.pillar == "content"));
    }

    #[test]
    fn test_baseline_without_version_reads_as_v2() {
        let json = r#"{"url": "https://example.com", "timestamp": "2026-01-01T00:00:00Z",
            "overall": 60.0, "scores": {"content": 30.0}}"#;
        let baseline: Baseline = serde_json::from_str(json).unwrap();
        assert_eq!(baseline.scoring_version, ScoringVersion::V2);
    }
}
