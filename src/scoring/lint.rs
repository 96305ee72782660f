use super::scheme::{ScoringVersion, MAX_CONTEXT_WASTE_PCT};
use crate::report::{
    AgentReadinessReport, ContentReport, LintCheck, LintResult, LlmsTxtReport, RobotsReport,
    SchemaReport, Severity,
};

fn check(name: &str, passed: bool, detail: String) -> LintCheck {
    LintCheck {
        name: name.to_string(),
        passed,
        severity: Severity::from_passed(passed),
        detail,
    }
}

/// Formats an integer with comma thousands separators
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Derives the ordered pass/warn checks from scored pillar reports
///
/// The Agent Readiness check is added only under v3 and only when an agent
/// readiness report is supplied.
pub fn compute_lint_results(
    robots: &RobotsReport,
    llms_txt: &LlmsTxtReport,
    schema_org: &SchemaReport,
    content: &ContentReport,
    version: ScoringVersion,
    agent_readiness: Option<&AgentReadinessReport>,
) -> LintResult {
    let mut checks = Vec::with_capacity(5);

    let primitives = llms_txt.any_found();
    checks.push(check(
        "AI Primitives",
        primitives,
        if primitives {
            "llms.txt found".to_string()
        } else {
            "No llms.txt found".to_string()
        },
    ));

    let (bot_pass, bot_detail) = if robots.found && !robots.bots.is_empty() {
        let blocked = robots.blocked_bots();
        let total = robots.bots.len();
        let mut detail = format!("{}/{} AI bots allowed", total - blocked.len(), total);
        if !blocked.is_empty() {
            let shown: Vec<&str> = blocked.iter().take(3).copied().collect();
            detail.push_str(&format!(" ({} blocked)", shown.join(", ")));
        }
        (blocked.is_empty(), detail)
    } else {
        (true, "No robots.txt found".to_string())
    };
    checks.push(check("Bot Access", bot_pass, bot_detail));

    let mut schema_detail = format!("{} JSON-LD blocks", schema_org.blocks_found);
    if !schema_org.schemas.is_empty() {
        let types: Vec<&str> = schema_org
            .schemas
            .iter()
            .take(3)
            .map(|s| s.schema_type.as_str())
            .collect();
        schema_detail.push_str(&format!(" ({})", types.join(", ")));
    }
    checks.push(check(
        "Data Structuring",
        schema_org.blocks_found > 0,
        schema_detail,
    ));

    let waste = content.context_waste_pct;
    let mut waste_detail = format!("{:.0}% Context Waste", waste);
    if content.estimated_raw_tokens > 0 {
        waste_detail.push_str(&format!(
            " ({} raw -> {} clean tokens)",
            group_thousands(content.estimated_raw_tokens),
            group_thousands(content.estimated_clean_tokens)
        ));
    }
    checks.push(check(
        "Token Efficiency",
        waste < MAX_CONTEXT_WASTE_PCT,
        waste_detail,
    ));

    if version == ScoringVersion::V3 {
        if let Some(ar) = agent_readiness {
            checks.push(check("Agent Readiness", ar.score > 0.0, ar.detail.clone()));
        }
    }

    let passed = checks.iter().all(|c| c.passed);
    LintResult {
        checks,
        context_waste_pct: waste,
        raw_tokens: content.estimated_raw_tokens,
        clean_tokens: content.estimated_clean_tokens,
        passed,
    }
}
