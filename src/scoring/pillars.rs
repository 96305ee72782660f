//! Per-pillar scoring
//!
//! Pillar scores are computed on the raw (v2) scale and stored on the report.
//! The overall score converts them to the selected scheme.

use super::scheme::{
    round1, Pillar, ScoringScheme, ScoringVersion, AGENT_READINESS_RULES, CHARS_PER_TOKEN,
    CONTENT_RULES, SCHEMA_RULES,
};
use crate::report::{AgentReadinessReport, ContentReport, LlmsTxtReport, RobotsReport, SchemaReport};
use std::collections::BTreeSet;

/// Raw pillar scores, on the v2 scale
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawScores {
    pub robots: f64,
    pub llms_txt: f64,
    pub schema_org: f64,
    pub content: f64,
}

/// Scores the robots pillar in place
///
/// Proportional to the share of evaluated bots that are allowed. Zero when
/// robots.txt was not found or no bots were evaluated.
pub fn score_robots(robots: &mut RobotsReport) {
    let max = ScoringScheme::V2.robots_max;
    robots.score = if robots.found && !robots.bots.is_empty() {
        round1(max * robots.allowed_count() as f64 / robots.bots.len() as f64)
    } else {
        0.0
    };
}

/// Scores the llms.txt pillar in place: all or nothing
pub fn score_llms_txt(llms_txt: &mut LlmsTxtReport) {
    llms_txt.score = if llms_txt.any_found() {
        ScoringScheme::V2.llms_txt_max
    } else {
        0.0
    };
}

/// Scores the structured data pillar in place
///
/// Bonuses are per unique `@type`; repeated blocks of one type count once.
pub fn score_schema(schema_org: &mut SchemaReport) {
    if schema_org.blocks_found == 0 {
        schema_org.score = 0.0;
        return;
    }

    let unique_types: BTreeSet<&str> = schema_org
        .schemas
        .iter()
        .map(|s| s.schema_type.as_str())
        .collect();
    let high = unique_types
        .iter()
        .filter(|t| SCHEMA_RULES.high_value_types.contains(t))
        .count();
    let standard = unique_types.len() - high;

    let score = SCHEMA_RULES.base_score
        + SCHEMA_RULES.high_value_bonus * high as f64
        + SCHEMA_RULES.standard_bonus * standard as f64;
    schema_org.score = score.min(ScoringScheme::V2.schema_org_max);
}

/// Base points for a word count: the first tier (from the top) it reaches
pub fn content_tier_score(word_count: usize) -> f64 {
    CONTENT_RULES
        .word_tiers
        .iter()
        .find(|(min_words, _)| word_count >= *min_words)
        .map(|(_, score)| *score)
        .unwrap_or(0.0)
}

/// Scores the content density pillar in place
pub fn score_content(content: &mut ContentReport) {
    let mut score = content_tier_score(content.word_count);
    if content.has_headings {
        score += CONTENT_RULES.heading_bonus;
    }
    if content.has_lists {
        score += CONTENT_RULES.list_bonus;
    }
    if content.has_code_blocks {
        score += CONTENT_RULES.code_bonus;
    }
    content.score = score.min(ScoringScheme::V2.content_max);
}

/// Sums the agent readiness sub-signals in place and writes the detail
///
/// The detail lists only non-zero sub-signals as `Name=value`.
pub fn compute_agent_readiness(report: &mut AgentReadinessReport) {
    let subs = report.sub_scores();
    let total: f64 = subs.iter().map(|(_, score)| score).sum();
    report.score = total.min(ScoringScheme::V3.agent_readiness_max);

    let parts: Vec<String> = subs
        .iter()
        .filter(|(_, score)| *score > 0.0)
        .map(|(name, score)| format!("{}={:.1}", name, score))
        .collect();

    report.detail = if parts.is_empty() {
        "No agent readiness signals detected".to_string()
    } else {
        parts.join(", ")
    };
}

/// Agent readiness sub-signal maxima, for display
pub fn agent_readiness_maxima() -> [(&'static str, f64); 6] {
    let r = AGENT_READINESS_RULES;
    [
        ("AGENTS.md", r.agents_md),
        ("MD-Accept", r.markdown_accept),
        ("MCP", r.mcp_endpoint),
        ("Semantic", r.semantic_html),
        ("x402", r.x402),
        ("NLWeb", r.nlweb),
    ]
}

/// Combines raw pillar scores into an overall score under a scheme
///
/// Under v3 each raw score is rescaled onto the v3 table and agent
/// readiness is added unscaled. Under v2 agent readiness is ignored.
pub fn overall_score(version: ScoringVersion, raw: RawScores, agent_readiness: Option<f64>) -> f64 {
    let scheme = version.scheme();
    let mut total = scheme.rescale(Pillar::Robots, raw.robots)
        + scheme.rescale(Pillar::LlmsTxt, raw.llms_txt)
        + scheme.rescale(Pillar::SchemaOrg, raw.schema_org)
        + scheme.rescale(Pillar::Content, raw.content);

    if version == ScoringVersion::V3 {
        total += agent_readiness.unwrap_or(0.0);
    }

    round1(total)
}

/// Scores all four base pillars in place and returns the overall score
///
/// Deterministic and free of I/O. Reports keep their raw v2-scale scores;
/// only the returned overall reflects the selected scheme.
pub fn compute_scores(
    robots: &mut RobotsReport,
    llms_txt: &mut LlmsTxtReport,
    schema_org: &mut SchemaReport,
    content: &mut ContentReport,
    version: ScoringVersion,
    agent_readiness: Option<&AgentReadinessReport>,
) -> f64 {
    score_robots(robots);
    score_llms_txt(llms_txt);
    score_schema(schema_org);
    score_content(content);

    let raw = RawScores {
        robots: robots.score,
        llms_txt: llms_txt.score,
        schema_org: schema_org.score,
        content: content.score,
    };
    overall_score(version, raw, agent_readiness.map(|ar| ar.score))
}

/// Fills the token-waste metrics of a content report
///
/// Tokens are estimated as characters / 4 for both the raw HTML and the
/// cleaned markdown; waste is the share of raw tokens the cleanup removed.
pub fn apply_token_metrics(content: &mut ContentReport, html: &str, markdown: &str) {
    let raw_chars = html.chars().count();
    let clean_chars = markdown.chars().count();
    let raw_tokens = raw_chars / CHARS_PER_TOKEN;
    let clean_tokens = clean_chars / CHARS_PER_TOKEN;

    content.raw_html_chars = raw_chars;
    content.clean_markdown_chars = clean_chars;
    content.estimated_raw_tokens = raw_tokens;
    content.estimated_clean_tokens = clean_tokens;
    content.context_waste_pct = context_waste_pct(raw_tokens, clean_tokens);
}

/// `(raw - clean) / raw * 100`, rounded to one decimal and clamped to [0, 100]
pub fn context_waste_pct(raw_tokens: usize, clean_tokens: usize) -> f64 {
    if raw_tokens == 0 {
        return 0.0;
    }
    let waste = (raw_tokens as f64 - clean_tokens as f64) / raw_tokens as f64 * 100.0;
    round1(waste).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{BotAccess, SchemaOrgBlock};

    fn bots(allowed: &[bool]) -> Vec<BotAccess> {
        allowed
            .iter()
            .enumerate()
            .map(|(i, a)| BotAccess {
                bot: format!("Bot{}", i),
                allowed: *a,
                detail: String::new(),
            })
            .collect()
    }

    fn schema(types: &[&str]) -> SchemaReport {
        SchemaReport {
            blocks_found: types.len(),
            schemas: types
                .iter()
                .map(|t| SchemaOrgBlock {
                    schema_type: t.to_string(),
                    properties: vec!["name".to_string()],
                })
                .collect(),
            ..SchemaReport::default()
        }
    }

    fn agent(scores: [f64; 6]) -> AgentReadinessReport {
        let mut ar = AgentReadinessReport::default();
        ar.agents_md.score = scores[0];
        ar.markdown_accept.score = scores[1];
        ar.mcp_endpoint.score = scores[2];
        ar.semantic_html.score = scores[3];
        ar.x402.score = scores[4];
        ar.nlweb.score = scores[5];
        ar
    }

    #[test]
    fn test_robots_proportional() {
        let mut robots = RobotsReport {
            found: true,
            bots: bots(&[true, true, false]),
            ..RobotsReport::default()
        };
        score_robots(&mut robots);
        assert_eq!(robots.score, 16.7);
    }

    #[test]
    fn test_robots_zero_when_not_found_or_empty() {
        let mut missing = RobotsReport {
            found: false,
            bots: bots(&[true]),
            ..RobotsReport::default()
        };
        score_robots(&mut missing);
        assert_eq!(missing.score, 0.0);

        let mut empty = RobotsReport {
            found: true,
            ..RobotsReport::default()
        };
        score_robots(&mut empty);
        assert_eq!(empty.score, 0.0);
        assert!(!empty.score.is_nan());
    }

    #[test]
    fn test_llms_txt_binary() {
        let mut llms = LlmsTxtReport::default();
        score_llms_txt(&mut llms);
        assert_eq!(llms.score, 0.0);

        llms.llms_full_found = true;
        score_llms_txt(&mut llms);
        assert_eq!(llms.score, 10.0);
    }

    #[test]
    fn test_schema_bonuses() {
        let mut report = schema(&["Organization", "FAQPage"]);
        score_schema(&mut report);
        assert_eq!(report.score, 8.0 + 3.0 + 5.0);
    }

    #[test]
    fn test_schema_duplicate_types_count_once() {
        let mut once = schema(&["Article"]);
        let mut twice = schema(&["Article", "Article"]);
        score_schema(&mut once);
        score_schema(&mut twice);
        assert_eq!(once.score, 13.0);
        assert_eq!(twice.score, once.score);
    }

    #[test]
    fn test_schema_capped() {
        let mut report = schema(&["FAQPage", "HowTo", "Article", "Product", "Recipe"]);
        score_schema(&mut report);
        assert_eq!(report.score, 25.0);
    }

    #[test]
    fn test_schema_zero_without_blocks() {
        let mut report = SchemaReport::default();
        score_schema(&mut report);
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_content_tier_boundaries_inclusive() {
        assert_eq!(content_tier_score(1500), 25.0);
        assert_eq!(content_tier_score(1499), 20.0);
        assert_eq!(content_tier_score(800), 20.0);
        assert_eq!(content_tier_score(400), 15.0);
        assert_eq!(content_tier_score(150), 8.0);
        assert_eq!(content_tier_score(149), 0.0);
    }

    #[test]
    fn test_content_bonuses_and_cap() {
        let mut content = ContentReport {
            word_count: 1500,
            has_headings: true,
            ..ContentReport::default()
        };
        score_content(&mut content);
        assert_eq!(content.score, 32.0);

        content.has_lists = true;
        content.has_code_blocks = true;
        score_content(&mut content);
        assert_eq!(content.score, 40.0);
    }

    #[test]
    fn test_agent_readiness_all_signals() {
        let mut ar = agent([5.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        compute_agent_readiness(&mut ar);
        assert_eq!(ar.score, 20.0);
        assert!(ar.detail.contains("AGENTS.md=5.0"));
        assert!(ar.detail.contains("NLWeb=1.0"));
    }

    #[test]
    fn test_agent_readiness_lists_only_nonzero() {
        let mut ar = agent([5.0, 0.0, 4.0, 0.0, 0.0, 0.0]);
        compute_agent_readiness(&mut ar);
        assert_eq!(ar.score, 9.0);
        assert_eq!(ar.detail, "AGENTS.md=5.0, MCP=4.0");
    }

    #[test]
    fn test_agent_readiness_single_and_sentinel() {
        let mut single = agent([0.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
        compute_agent_readiness(&mut single);
        assert_eq!(single.detail, "x402=2.0");

        let mut none = AgentReadinessReport::default();
        compute_agent_readiness(&mut none);
        assert_eq!(none.score, 0.0);
        assert_eq!(none.detail, "No agent readiness signals detected");
    }

    #[test]
    fn test_agent_readiness_capped() {
        let mut ar = agent([10.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        compute_agent_readiness(&mut ar);
        assert_eq!(ar.score, 20.0);
    }

    #[test]
    fn test_v2_perfect_and_zero() {
        let mut robots = RobotsReport {
            found: true,
            bots: bots(&[true; 13]),
            ..RobotsReport::default()
        };
        let mut llms = LlmsTxtReport {
            found: true,
            ..LlmsTxtReport::default()
        };
        let mut schema_org = schema(&["Organization", "Article", "Product", "FAQPage"]);
        let mut content = ContentReport {
            word_count: 2000,
            has_headings: true,
            has_lists: true,
            has_code_blocks: true,
            ..ContentReport::default()
        };
        let overall = compute_scores(
            &mut robots,
            &mut llms,
            &mut schema_org,
            &mut content,
            ScoringVersion::V2,
            None,
        );
        assert_eq!(overall, 100.0);

        let overall = compute_scores(
            &mut RobotsReport::default(),
            &mut LlmsTxtReport::default(),
            &mut SchemaReport::default(),
            &mut ContentReport::default(),
            ScoringVersion::V2,
            None,
        );
        assert_eq!(overall, 0.0);
    }

    #[test]
    fn test_v2_ignores_agent_readiness() {
        let mut ar = agent([5.0, 0.0, 4.0, 0.0, 0.0, 0.0]);
        compute_agent_readiness(&mut ar);
        let mut llms = LlmsTxtReport {
            found: true,
            ..LlmsTxtReport::default()
        };
        let overall = compute_scores(
            &mut RobotsReport::default(),
            &mut llms,
            &mut SchemaReport::default(),
            &mut ContentReport::default(),
            ScoringVersion::V2,
            Some(&ar),
        );
        assert_eq!(overall, 10.0);
    }

    #[test]
    fn test_v3_rescales_and_keeps_raw_on_reports() {
        let mut ar = agent([5.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        compute_agent_readiness(&mut ar);
        let mut robots = RobotsReport {
            found: true,
            bots: bots(&[true; 13]),
            ..RobotsReport::default()
        };
        let mut llms = LlmsTxtReport {
            found: true,
            ..LlmsTxtReport::default()
        };
        let mut schema_org = schema(&["Organization", "Article", "Product", "FAQPage"]);
        let mut content = ContentReport {
            word_count: 2000,
            has_headings: true,
            has_lists: true,
            has_code_blocks: true,
            ..ContentReport::default()
        };
        let overall = compute_scores(
            &mut robots,
            &mut llms,
            &mut schema_org,
            &mut content,
            ScoringVersion::V3,
            Some(&ar),
        );
        assert_eq!(overall, 100.0);
        assert_eq!(robots.score, 25.0);
        assert_eq!(llms.score, 10.0);
        assert_eq!(content.score, 40.0);
    }

    #[test]
    fn test_v3_content_scaling() {
        let mut content = ContentReport {
            word_count: 1500,
            has_headings: true,
            ..ContentReport::default()
        };
        let overall = compute_scores(
            &mut RobotsReport::default(),
            &mut LlmsTxtReport::default(),
            &mut SchemaReport::default(),
            &mut content,
            ScoringVersion::V3,
            None,
        );
        assert_eq!(content.score, 32.0);
        assert_eq!(overall, 28.0);
    }

    #[test]
    fn test_token_metrics() {
        let mut content = ContentReport::default();
        let html = "x".repeat(4000);
        let markdown = "y".repeat(1000);
        apply_token_metrics(&mut content, &html, &markdown);

        assert_eq!(content.estimated_raw_tokens, 1000);
        assert_eq!(content.estimated_clean_tokens, 250);
        assert_eq!(content.context_waste_pct, 75.0);
    }

    #[test]
    fn test_token_waste_edge_cases() {
        assert_eq!(context_waste_pct(0, 0), 0.0);
        assert_eq!(context_waste_pct(0, 10), 0.0);
        assert_eq!(context_waste_pct(10, 20), 0.0);
        assert_eq!(context_waste_pct(3, 2), 33.3);
    }
}
