//! Informational signals: content-usage header, RSL and E-E-A-T

use crate::report::{ContentUsageReport, EeatReport, RslReport};
use crate::robots::ParsedRobots;
use scraper::{Html, Selector};

/// Parses a `Content-Usage` header value
///
/// The header is a list of `key=value` pairs separated by `,` or `;`. Only
/// `train-ai` is interpreted.
pub fn parse_content_usage(header: Option<&str>) -> ContentUsageReport {
    let Some(value) = header.map(str::trim).filter(|v| !v.is_empty()) else {
        return ContentUsageReport {
            detail: "No Content-Usage header".to_string(),
            ..ContentUsageReport::default()
        };
    };

    let allows_training = value
        .split([',', ';'])
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("train-ai"))
        .and_then(|(_, v)| match v.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        });

    let detail = match allows_training {
        Some(true) => "AI training allowed".to_string(),
        Some(false) => "AI training disallowed".to_string(),
        None => format!("Content-Usage: {}", value),
    };

    ContentUsageReport {
        header_found: true,
        header_value: Some(value.to_string()),
        allows_training,
        detail,
    }
}

/// Reads a Really Simple Licensing `License:` directive from robots.txt
pub fn check_rsl(robots_body: Option<&str>) -> RslReport {
    let license = robots_body.and_then(|body| ParsedRobots::from_content(body).license());

    match license {
        Some(url) => RslReport {
            indicators_found: true,
            detail: format!("RSL license: {}", url),
            license_url: Some(url),
        },
        None => RslReport {
            detail: "No RSL license directive".to_string(),
            ..RslReport::default()
        },
    }
}

fn has_any(document: &Html, css: &str) -> bool {
    Selector::parse(css)
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false)
}

/// Looks for authorship, freshness, about/contact and citation markers
///
/// `base_domain` decides which links count as external citations.
pub fn check_eeat(html: &str, base_domain: &str) -> EeatReport {
    if html.trim().is_empty() {
        return EeatReport {
            detail: "No HTML to analyze".to_string(),
            ..EeatReport::default()
        };
    }

    let document = Html::parse_document(html);
    let lower_html = html.to_ascii_lowercase();

    let has_author = has_any(
        &document,
        r#"meta[name="author"], [rel="author"], [itemprop="author"], .author, .byline"#,
    ) || lower_html.contains("\"author\"");
    let has_date = has_any(
        &document,
        r#"time[datetime], meta[property="article:published_time"], meta[property="article:modified_time"], [itemprop="datePublished"]"#,
    ) || lower_html.contains("\"datepublished\"");
    let has_about_page = has_any(&document, r#"a[href*="about"]"#);
    let has_contact_info = has_any(
        &document,
        r#"a[href^="mailto:"], a[href^="tel:"], a[href*="contact"]"#,
    );

    let base = base_domain.to_ascii_lowercase();
    let external_link = Selector::parse("a[href]")
        .map(|selector| {
            document.select(&selector).any(|a| {
                a.value()
                    .attr("href")
                    .and_then(|href| url::Url::parse(href).ok())
                    .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
                    .map(|host| !host.is_empty() && host != base && !host.ends_with(&format!(".{}", base)))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false);
    let has_citations = external_link || has_any(&document, "cite, blockquote[cite]");

    let trust_signals = [
        has_author,
        has_date,
        has_about_page,
        has_contact_info,
        has_citations,
    ]
    .iter()
    .filter(|s| **s)
    .count();

    EeatReport {
        has_author,
        has_date,
        has_about_page,
        has_contact_info,
        has_citations,
        trust_signals,
        detail: format!("{}/5 trust signals", trust_signals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_usage_missing() {
        let report = parse_content_usage(None);
        assert!(!report.header_found);
        assert_eq!(report.allows_training, None);
    }

    #[test]
    fn test_content_usage_train_ai() {
        let report = parse_content_usage(Some("train-ai=n, search=y"));
        assert!(report.header_found);
        assert_eq!(report.allows_training, Some(false));

        let report = parse_content_usage(Some("search=y; train-ai=y"));
        assert_eq!(report.allows_training, Some(true));

        let report = parse_content_usage(Some("search=y"));
        assert_eq!(report.allows_training, None);
        assert_eq!(report.header_value.as_deref(), Some("search=y"));
    }

    #[test]
    fn test_rsl() {
        let report = check_rsl(Some("License: https://example.com/rsl.xml\nUser-agent: *\nAllow: /"));
        assert!(report.indicators_found);
        assert_eq!(report.license_url.as_deref(), Some("https://example.com/rsl.xml"));

        assert!(!check_rsl(None).indicators_found);
        assert!(!check_rsl(Some("User-agent: *")).indicators_found);
    }

    #[test]
    fn test_eeat_signals() {
        let html = r#"
            <html><head><meta name="author" content="Ada"></head>
            <body>
                <time datetime="2026-01-01">Jan 1</time>
                <a href="/about">About</a>
                <a href="mailto:hi@example.com">Mail</a>
                <a href="https://research.org/paper">Source</a>
            </body></html>
        "#;
        let report = check_eeat(html, "example.com");
        assert_eq!(report.trust_signals, 5);
        assert_eq!(report.detail, "5/5 trust signals");
    }

    #[test]
    fn test_eeat_internal_links_are_not_citations() {
        let html = r#"<body><a href="https://example.com/page">x</a><a href="https://docs.example.com/">y</a></body>"#;
        let report = check_eeat(html, "example.com");
        assert!(!report.has_citations);
        assert_eq!(report.trust_signals, 0);
    }
}
