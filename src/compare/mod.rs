//! Score comparison
//!
//! Compares pillar score snapshots between two audits, checks reports
//! against an [`AuditPolicy`], and persists baselines for CI use.

mod baseline;
mod thresholds;

pub use baseline::{compare_baseline, Baseline};
pub use thresholds::{check_thresholds, AuditPolicy, ThresholdFailure, ThresholdResult};

use crate::report::ScoreView;
use crate::scoring::Pillar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Change in one pillar between two snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarDelta {
    pub pillar: String,
    pub previous_score: f64,
    pub current_score: f64,
    pub delta: f64,
    pub regressed: bool,
}

/// Outcome of comparing two score snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Only pillars present in both snapshots
    pub pillars: Vec<PillarDelta>,
    pub has_regression: bool,
    pub passed: bool,
}

impl RegressionResult {
    /// Pillars whose score dropped by at least the threshold
    pub fn regressions(&self) -> impl Iterator<Item = &PillarDelta> {
        self.pillars.iter().filter(|p| p.regressed)
    }
}

/// Compares two pillar snapshots
///
/// A pillar regresses when `current - previous <= -threshold`. Pillars
/// missing from either side are skipped, never an error.
pub fn compare(
    previous: &BTreeMap<String, f64>,
    current: &BTreeMap<String, f64>,
    threshold: f64,
) -> RegressionResult {
    let pillars: Vec<PillarDelta> = previous
        .iter()
        .filter_map(|(pillar, &previous_score)| {
            let current_score = *current.get(pillar)?;
            let delta = current_score - previous_score;
            Some(PillarDelta {
                pillar: pillar.clone(),
                previous_score,
                current_score,
                delta,
                regressed: delta <= -threshold,
            })
        })
        .collect();

    let has_regression = pillars.iter().any(|p| p.regressed);
    RegressionResult {
        pillars,
        has_regression,
        passed: !has_regression,
    }
}

/// Raw pillar scores of a report, keyed by pillar name
///
/// Agent readiness is included only when the report carries it.
pub fn pillar_scores(report: &dyn ScoreView) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    scores.insert(Pillar::Robots.name().to_string(), report.robots().score);
    scores.insert(Pillar::LlmsTxt.name().to_string(), report.llms_txt().score);
    scores.insert(Pillar::SchemaOrg.name().to_string(), report.schema_org().score);
    scores.insert(Pillar::Content.name().to_string(), report.content().score);
    if let Some(agent) = report.agent_readiness() {
        scores.insert(Pillar::AgentReadiness.name().to_string(), agent.score);
    }
    scores
}

/// Pillar scores plus the overall score under the `overall` key
pub fn score_snapshot(report: &dyn ScoreView) -> BTreeMap<String, f64> {
    let mut scores = pillar_scores(report);
    scores.insert("overall".to_string(), report.overall_score());
    scores
}
