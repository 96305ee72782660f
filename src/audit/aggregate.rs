//! Per-page scoring and site-level aggregation

use crate::probes::{analyze_content, parse_structured_data};
use crate::report::{ContentReport, LlmsTxtReport, PageAudit, RobotsReport, SchemaReport};
use crate::scoring::{apply_token_metrics, context_waste_pct, round1, score_content, score_schema};
use crate::url::path_depth;

/// Scores the page-local pillars of one fetched page
pub fn audit_page_content(url: &str, html: &str, markdown: &str) -> PageAudit {
    let mut schema_org = parse_structured_data(html);
    let mut content = analyze_content(markdown);
    apply_token_metrics(&mut content, html, markdown);
    score_schema(&mut schema_org);
    score_content(&mut content);

    PageAudit {
        url: url.to_string(),
        schema_org,
        content,
        errors: Vec::new(),
    }
}

/// Aggregation weight of a page: shallow pages count more
///
/// Depth 0-1 weighs 3, depth 2 weighs 2, anything deeper weighs 1.
pub fn page_weight(url: &str) -> u32 {
    match path_depth(url) {
        0 | 1 => 3,
        2 => 2,
        _ => 1,
    }
}

/// Combines per-page results into site-level structured data and content reports
///
/// Only successful pages take part. Scores are depth-weighted averages;
/// word and char counts are plain integer means and structure flags are
/// OR-ed. The returned total is on the raw scale: site-wide robots and
/// llms.txt plus the two averages, or just the site-wide pillars when no
/// page succeeded.
pub fn aggregate_page_scores(
    pages: &[PageAudit],
    robots: &RobotsReport,
    llms_txt: &LlmsTxtReport,
) -> (SchemaReport, ContentReport, f64) {
    let successful: Vec<&PageAudit> = pages.iter().filter(|p| p.is_successful()).collect();
    if successful.is_empty() {
        return (
            SchemaReport::with_detail("No pages audited successfully"),
            ContentReport::with_detail("No pages audited successfully"),
            round1(robots.score + llms_txt.score),
        );
    }

    let weights: Vec<f64> = successful.iter().map(|p| page_weight(&p.url) as f64).collect();
    let total_weight: f64 = weights.iter().sum();
    let n = successful.len();

    let mut schemas = Vec::new();
    let mut total_blocks = 0;
    let mut schema_sum = 0.0;
    let mut content_sum = 0.0;
    let mut word_sum = 0;
    let mut char_sum = 0;
    let mut content = ContentReport::default();

    for (page, weight) in successful.iter().zip(&weights) {
        schemas.extend(page.schema_org.schemas.iter().cloned());
        total_blocks += page.schema_org.blocks_found;
        schema_sum += page.schema_org.score * weight;

        content_sum += page.content.score * weight;
        word_sum += page.content.word_count;
        char_sum += page.content.char_count;
        content.has_headings |= page.content.has_headings;
        content.has_lists |= page.content.has_lists;
        content.has_code_blocks |= page.content.has_code_blocks;

        content.raw_html_chars += page.content.raw_html_chars;
        content.clean_markdown_chars += page.content.clean_markdown_chars;
        content.estimated_raw_tokens += page.content.estimated_raw_tokens;
        content.estimated_clean_tokens += page.content.estimated_clean_tokens;
    }

    let schema_score = round1(schema_sum / total_weight);
    let schema_org = SchemaReport {
        blocks_found: total_blocks,
        schemas,
        score: schema_score,
        detail: format!(
            "{} JSON-LD block(s) across {} pages (weighted avg score {})",
            total_blocks, n, schema_score
        ),
    };

    let content_score = round1(content_sum / total_weight);
    content.word_count = word_sum / n;
    content.char_count = char_sum / n;
    content.context_waste_pct =
        context_waste_pct(content.estimated_raw_tokens, content.estimated_clean_tokens);
    content.score = content_score;
    content.detail = format!(
        "avg {} words across {} pages (weighted avg score {})",
        content.word_count, n, content_score
    );

    let total = round1(robots.score + llms_txt.score + schema_score + content_score);
    (schema_org, content, total)
}
