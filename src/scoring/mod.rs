//! Scoring engine
//!
//! Pure functions that turn raw pillar reports into scores under a versioned
//! scheme, and derive lint checks from the scored reports.

mod lint;
mod pillars;
mod scheme;

pub use lint::compute_lint_results;
pub use pillars::{
    agent_readiness_maxima, apply_token_metrics, compute_agent_readiness, compute_scores,
    content_tier_score, context_waste_pct, overall_score, score_content, score_llms_txt,
    score_robots, score_schema, RawScores,
};
pub use scheme::{
    round1, AgentReadinessRules, ContentRules, Pillar, SchemaRules, ScoringScheme, ScoringVersion,
    AGENT_READINESS_RULES, CHARS_PER_TOKEN, CONTENT_RULES, MAX_CONTEXT_WASTE_PCT, SCHEMA_RULES,
};
