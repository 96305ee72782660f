use serde::{Deserialize, Serialize};

/// AGENTS.md manifest probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsMdReport {
    pub found: bool,
    pub url: Option<String>,
    pub score: f64,
    pub detail: String,
}

/// `Accept: text/markdown` content negotiation probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownAcceptReport {
    pub supported: bool,
    pub content_type: Option<String>,
    pub score: f64,
    pub detail: String,
}

/// `/.well-known/mcp.json` tool discovery probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpEndpointReport {
    pub found: bool,
    pub url: Option<String>,
    pub tools_count: Option<usize>,
    pub score: f64,
    pub detail: String,
}

/// Semantic landmark coverage of the page HTML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticHtmlReport {
    pub has_main: bool,
    pub has_article: bool,
    pub has_header: bool,
    pub has_footer: bool,
    pub has_nav: bool,
    pub aria_landmarks: usize,
    pub score: f64,
    pub detail: String,
}

/// HTTP 402 payment challenge probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct X402Report {
    pub found: bool,
    pub has_402_status: bool,
    pub has_payment_header: bool,
    pub score: f64,
    pub detail: String,
}

/// NLWeb discovery probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NlwebReport {
    pub found: bool,
    pub well_known_found: bool,
    pub schema_extensions: bool,
    pub score: f64,
    pub detail: String,
}

/// Agent readiness pillar: six independently scored sub-signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentReadinessReport {
    pub agents_md: AgentsMdReport,
    pub markdown_accept: MarkdownAcceptReport,
    pub mcp_endpoint: McpEndpointReport,
    pub semantic_html: SemanticHtmlReport,
    pub x402: X402Report,
    pub nlweb: NlwebReport,
    pub score: f64,
    pub detail: String,
}

impl AgentReadinessReport {
    /// Display label and score of every sub-signal, in fixed order
    pub fn sub_scores(&self) -> [(&'static str, f64); 6] {
        [
            ("AGENTS.md", self.agents_md.score),
            ("MD-Accept", self.markdown_accept.score),
            ("MCP", self.mcp_endpoint.score),
            ("Semantic", self.semantic_html.score),
            ("x402", self.x402.score),
            ("NLWeb", self.nlweb.score),
        ]
    }
}
