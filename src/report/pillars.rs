use serde::{Deserialize, Serialize};

/// Whether a single AI bot may crawl the site root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotAccess {
    pub bot: String,
    pub allowed: bool,
    pub detail: String,
}

/// Robots access pillar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotsReport {
    /// robots.txt answered with 200
    pub found: bool,
    pub bots: Vec<BotAccess>,
    pub score: f64,
    pub detail: String,
}

impl RobotsReport {
    /// An unfound report carrying only a detail string
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            ..Self::default()
        }
    }

    /// Number of evaluated bots that are allowed
    pub fn allowed_count(&self) -> usize {
        self.bots.iter().filter(|b| b.allowed).count()
    }

    /// Names of evaluated bots that are blocked, in evaluation order
    pub fn blocked_bots(&self) -> Vec<&str> {
        self.bots
            .iter()
            .filter(|b| !b.allowed)
            .map(|b| b.bot.as_str())
            .collect()
    }
}

/// llms.txt pillar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmsTxtReport {
    pub found: bool,
    pub url: Option<String>,
    pub llms_full_found: bool,
    pub llms_full_url: Option<String>,
    pub score: f64,
    pub detail: String,
}

impl LlmsTxtReport {
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            ..Self::default()
        }
    }

    /// True when either llms.txt or llms-full.txt was found
    pub fn any_found(&self) -> bool {
        self.found || self.llms_full_found
    }
}

/// One JSON-LD block: its `@type` and top-level property names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOrgBlock {
    pub schema_type: String,
    pub properties: Vec<String>,
}

/// Structured data pillar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaReport {
    pub blocks_found: usize,
    pub schemas: Vec<SchemaOrgBlock>,
    pub score: f64,
    pub detail: String,
}

impl SchemaReport {
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            ..Self::default()
        }
    }
}

/// Content density pillar, including token-waste metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentReport {
    pub word_count: usize,
    pub char_count: usize,
    pub has_headings: bool,
    pub has_lists: bool,
    pub has_code_blocks: bool,

    /// Heading-delimited sections with at least one word
    pub chunk_count: usize,
    pub avg_chunk_words: usize,
    /// Sections between 50 and 150 words
    pub chunks_in_sweet_spot: usize,

    pub raw_html_chars: usize,
    pub clean_markdown_chars: usize,
    pub estimated_raw_tokens: usize,
    pub estimated_clean_tokens: usize,
    pub context_waste_pct: f64,

    pub score: f64,
    pub detail: String,
}

impl ContentReport {
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            ..Self::default()
        }
    }
}
