//! Semantic landmark analysis of page HTML

use crate::report::SemanticHtmlReport;
use crate::scoring::AGENT_READINESS_RULES;
use scraper::{Html, Selector};

/// ARIA roles counted as landmarks
const LANDMARK_ROLES: &[&str] = &[
    "main",
    "navigation",
    "banner",
    "contentinfo",
    "complementary",
    "search",
    "region",
    "form",
];

fn has_any(document: &Html, css: &str) -> bool {
    Selector::parse(css)
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false)
}

/// Scores landmark coverage
///
/// `<main>` is worth a third of the sub-signal; `<article>`, `<header>`,
/// `<footer>` and `<nav>` share the rest. An element's ARIA role counts as
/// the element itself.
pub fn analyze_semantic_html(html: &str) -> SemanticHtmlReport {
    if html.trim().is_empty() {
        return SemanticHtmlReport {
            detail: "No HTML to analyze".to_string(),
            ..SemanticHtmlReport::default()
        };
    }

    let document = Html::parse_document(html);
    let has_main = has_any(&document, r#"main, [role="main"]"#);
    let has_article = has_any(&document, "article");
    let has_header = has_any(&document, r#"header, [role="banner"]"#);
    let has_footer = has_any(&document, r#"footer, [role="contentinfo"]"#);
    let has_nav = has_any(&document, r#"nav, [role="navigation"]"#);

    let aria_landmarks = Selector::parse("[role]")
        .map(|selector| {
            document
                .select(&selector)
                .filter(|el| {
                    el.value()
                        .attr("role")
                        .map(|r| LANDMARK_ROLES.contains(&r.trim().to_ascii_lowercase().as_str()))
                        .unwrap_or(false)
                })
                .count()
        })
        .unwrap_or(0);

    let max = AGENT_READINESS_RULES.semantic_html;
    let secondary = [has_article, has_header, has_footer, has_nav]
        .iter()
        .filter(|present| **present)
        .count() as f64;
    let mut score = secondary * (max * 2.0 / 3.0) / 4.0;
    if has_main {
        score += max / 3.0;
    }
    let score = crate::scoring::round1(score.min(max));

    let present: Vec<&str> = [
        ("main", has_main),
        ("article", has_article),
        ("header", has_header),
        ("footer", has_footer),
        ("nav", has_nav),
    ]
    .iter()
    .filter(|(_, found)| *found)
    .map(|(name, _)| *name)
    .collect();

    let detail = if present.is_empty() {
        "No semantic landmarks found".to_string()
    } else {
        format!(
            "Landmarks: {} ({} ARIA roles)",
            present.join(", "),
            aria_landmarks
        )
    };

    SemanticHtmlReport {
        has_main,
        has_article,
        has_header,
        has_footer,
        has_nav,
        aria_landmarks,
        score,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_html_scores_zero() {
        let report = analyze_semantic_html("");
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_full_coverage() {
        let html = "<body><header></header><nav></nav><main><article></article></main><footer></footer></body>";
        let report = analyze_semantic_html(html);
        assert!(report.has_main && report.has_article && report.has_nav);
        assert_eq!(report.score, 3.0);
    }

    #[test]
    fn test_main_only() {
        let report = analyze_semantic_html("<body><main><p>x</p></main></body>");
        assert_eq!(report.score, 1.0);
    }

    #[test]
    fn test_div_soup() {
        let report = analyze_semantic_html("<body><div><div>x</div></div></body>");
        assert_eq!(report.score, 0.0);
        assert_eq!(report.detail, "No semantic landmarks found");
    }

    #[test]
    fn test_aria_roles_count() {
        let html = r#"<body><div role="main">x</div><div role="navigation"></div><div role="button"></div></body>"#;
        let report = analyze_semantic_html(html);
        assert!(report.has_main);
        assert!(report.has_nav);
        assert_eq!(report.aria_landmarks, 2);
        assert_eq!(report.score, 1.5);
    }
}
