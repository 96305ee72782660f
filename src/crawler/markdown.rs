//! Readable markdown rendering of an HTML page
//!
//! Produces the "clean" text an LLM would ingest: headings, paragraphs,
//! list items and fenced code, with page chrome dropped.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose content never reaches the markdown
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "canvas", "iframe", "form", "button",
    "nav", "footer", "aside", "header", "head",
];

/// Elements that start a new block
const BLOCK_TAGS: &[&str] = &[
    "div", "section", "article", "main", "body", "html", "ul", "ol", "table", "tr", "blockquote",
    "figure", "figcaption", "dl", "dt", "dd", "details", "summary", "hr",
];

/// Converts HTML into cleaned markdown
///
/// Content is taken from `<main>`, else `<article>`, else `<body>`.
pub fn html_to_markdown(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(html);
    let root = ["main", "article", "body"]
        .iter()
        .find_map(|css| first_match(&document, css))
        .unwrap_or_else(|| document.root_element());

    let mut renderer = Renderer::default();
    renderer.render_children(root);
    renderer.finish()
}

fn first_match<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

fn heading_level(name: &str) -> Option<usize> {
    let mut chars = name.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('h'), Some(d @ '1'..='6'), None) => d.to_digit(10).map(|d| d as usize),
        _ => None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Default)]
struct Renderer {
    blocks: Vec<String>,
    inline: String,
}

impl Renderer {
    fn render_children(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            if let Some(el) = ElementRef::wrap(child) {
                self.render_element(el);
            } else if let Node::Text(text) = child.value() {
                self.push_text(text);
            }
        }
    }

    fn render_element(&mut self, el: ElementRef<'_>) {
        let name = el.value().name();
        if SKIPPED_TAGS.contains(&name) {
            return;
        }

        if let Some(level) = heading_level(name) {
            self.flush();
            let text = collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                self.blocks.push(format!("{} {}", "#".repeat(level), text));
            }
            return;
        }

        match name {
            "p" => {
                self.flush();
                self.render_children(el);
                self.flush();
            }
            "li" => {
                self.flush();
                let text = collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "));
                if !text.is_empty() {
                    self.blocks.push(format!("- {}", text));
                }
            }
            "pre" => {
                self.flush();
                let code: String = el.text().collect();
                let code = code.trim_matches('\n');
                if !code.trim().is_empty() {
                    self.blocks.push(format!("```\n{}\n```", code));
                }
            }
            "code" => {
                let code = collapse_whitespace(&el.text().collect::<String>());
                if !code.is_empty() {
                    self.push_text(&format!(" `{}` ", code));
                }
            }
            "br" => self.flush(),
            "img" => {
                if let Some(alt) = el.value().attr("alt").filter(|a| !a.trim().is_empty()) {
                    self.push_text(&format!(" {} ", alt.trim()));
                }
            }
            _ if BLOCK_TAGS.contains(&name) => {
                self.flush();
                self.render_children(el);
                self.flush();
            }
            _ => self.render_children(el),
        }
    }

    fn push_text(&mut self, text: &str) {
        let collapsed = collapse_whitespace(text);
        let leading = text.starts_with(char::is_whitespace);
        let trailing = text.ends_with(char::is_whitespace);

        if (leading || collapsed.is_empty()) && !self.inline.is_empty() && !self.inline.ends_with(' ')
        {
            self.inline.push(' ');
        }
        if collapsed.is_empty() {
            return;
        }
        self.inline.push_str(&collapsed);
        if trailing {
            self.inline.push(' ');
        }
    }

    fn flush(&mut self) {
        let block = self.inline.trim();
        if !block.is_empty() {
            self.blocks.push(block.to_string());
        }
        self.inline.clear();
    }

    fn finish(mut self) -> String {
        self.flush();
        self.blocks.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_html() {
        assert_eq!(html_to_markdown(""), "");
        assert_eq!(html_to_markdown("   "), "");
    }

    #[test]
    fn test_headings_paragraphs_lists() {
        let html = r#"
            <html><body>
                <h1>Title</h1>
                <p>Some <strong>bold</strong> text.</p>
                <ul><li>One</li><li>Two</li></ul>
                <h2>Section</h2>
            </body></html>
        "#;
        let md = html_to_markdown(html);
        assert_eq!(md, "# Title\n\nSome bold text.\n\n- One\n\n- Two\n\n## Section");
    }

    #[test]
    fn test_code_block_fenced() {
        let html = "<body><pre><code>let x = 1;\nlet y = 2;</code></pre></body>";
        let md = html_to_markdown(html);
        assert!(md.contains("```\nlet x = 1;\nlet y = 2;\n```"));
    }

    #[test]
    fn test_chrome_dropped() {
        let html = r#"
            <html><head><title>T</title><style>body{}</style></head>
            <body>
                <header>Site header</header>
                <nav><a href="/">Home</a></nav>
                <p>Body text</p>
                <script>var x = 1;</script>
                <footer>Copyright</footer>
            </body></html>
        "#;
        let md = html_to_markdown(html);
        assert_eq!(md, "Body text");
    }

    #[test]
    fn test_prefers_main() {
        let html = "<body><div>Outside</div><main><p>Inside</p></main></body>";
        assert_eq!(html_to_markdown(html), "Inside");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("header"), None);
        assert_eq!(heading_level("hr"), None);
    }
}
