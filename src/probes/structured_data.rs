//! JSON-LD structured data extraction

use crate::report::{SchemaOrgBlock, SchemaReport};
use scraper::{Html, Selector};
use serde_json::Value;

/// Extracts every JSON-LD block in the HTML
///
/// Top-level arrays and `@graph` containers are flattened; each object
/// becomes one block. Scripts that are not valid JSON are skipped.
pub fn parse_structured_data(html: &str) -> SchemaReport {
    if html.trim().is_empty() {
        return SchemaReport::with_detail("No HTML to analyze");
    }

    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return SchemaReport::default();
    };

    let mut schemas = Vec::new();
    for script in document.select(&selector) {
        let raw: String = script.text().collect();
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => collect_blocks(&value, &mut schemas),
            Err(e) => tracing::debug!("Skipping invalid JSON-LD block: {}", e),
        }
    }

    let detail = if schemas.is_empty() {
        "No JSON-LD structured data found".to_string()
    } else {
        let types: Vec<&str> = schemas.iter().map(|s| s.schema_type.as_str()).collect();
        format!("{} JSON-LD block(s): {}", schemas.len(), types.join(", "))
    };

    SchemaReport {
        blocks_found: schemas.len(),
        schemas,
        score: 0.0,
        detail,
    }
}

fn collect_blocks(value: &Value, out: &mut Vec<SchemaOrgBlock>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_blocks(item, out);
            }
        }
        Value::Object(map) => {
            if let Some(graph) = map.get("@graph") {
                collect_blocks(graph, out);
                if !map.contains_key("@type") {
                    return;
                }
            }

            let schema_type = match map.get("@type") {
                Some(Value::String(t)) => t.clone(),
                Some(Value::Array(types)) => types
                    .iter()
                    .filter_map(Value::as_str)
                    .next()
                    .unwrap_or("Unknown")
                    .to_string(),
                _ => "Unknown".to_string(),
            };
            let properties = map
                .keys()
                .filter(|k| !k.starts_with('@'))
                .cloned()
                .collect();

            out.push(SchemaOrgBlock {
                schema_type,
                properties,
            });
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(blocks: &[&str]) -> String {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{}</script>"#, b))
            .collect();
        format!("<html><head>{}</head><body></body></html>", scripts)
    }

    #[test]
    fn test_no_html() {
        let report = parse_structured_data("");
        assert_eq!(report.blocks_found, 0);
    }

    #[test]
    fn test_no_blocks() {
        let report = parse_structured_data("<html><body><p>hi</p></body></html>");
        assert_eq!(report.blocks_found, 0);
        assert_eq!(report.detail, "No JSON-LD structured data found");
    }

    #[test]
    fn test_single_block() {
        let html = page(&[r#"{"@context": "https://schema.org", "@type": "Article", "headline": "X", "author": "Y"}"#]);
        let report = parse_structured_data(&html);
        assert_eq!(report.blocks_found, 1);
        assert_eq!(report.schemas[0].schema_type, "Article");
        assert!(report.schemas[0].properties.contains(&"headline".to_string()));
        assert!(!report.schemas[0].properties.iter().any(|p| p.starts_with('@')));
    }

    #[test]
    fn test_array_and_graph() {
        let html = page(&[
            r#"[{"@type": "Organization", "name": "A"}, {"@type": "WebSite", "url": "u"}]"#,
            r#"{"@context": "https://schema.org", "@graph": [{"@type": "FAQPage", "mainEntity": []}]}"#,
        ]);
        let report = parse_structured_data(&html);
        let types: Vec<&str> = report.schemas.iter().map(|s| s.schema_type.as_str()).collect();
        assert_eq!(types, vec!["Organization", "WebSite", "FAQPage"]);
        assert_eq!(report.blocks_found, 3);
    }

    #[test]
    fn test_type_array_and_invalid_json() {
        let html = page(&[r#"{"@type": ["Product", "Thing"], "name": "P"}"#, "{not json"]);
        let report = parse_structured_data(&html);
        assert_eq!(report.blocks_found, 1);
        assert_eq!(report.schemas[0].schema_type, "Product");
    }
}
