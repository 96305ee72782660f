use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects which point allocation an audit is scored under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringVersion {
    /// Four pillars: robots 25, llms.txt 10, structured data 25, content 40
    #[default]
    V2,
    /// V2 pillars rescaled plus a 20 point agent readiness pillar
    V3,
}

impl ScoringVersion {
    pub fn scheme(self) -> &'static ScoringScheme {
        match self {
            Self::V2 => &ScoringScheme::V2,
            Self::V3 => &ScoringScheme::V3,
        }
    }
}

impl FromStr for ScoringVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v2" | "2" => Ok(Self::V2),
            "v3" | "3" => Ok(Self::V3),
            other => Err(ConfigError::UnknownScoringVersion(other.to_string())),
        }
    }
}

impl fmt::Display for ScoringVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2 => write!(f, "v2"),
            Self::V3 => write!(f, "v3"),
        }
    }
}

/// A scored readiness category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pillar {
    Robots,
    LlmsTxt,
    SchemaOrg,
    Content,
    AgentReadiness,
}

impl Pillar {
    pub const ALL: [Pillar; 5] = [
        Pillar::Robots,
        Pillar::LlmsTxt,
        Pillar::SchemaOrg,
        Pillar::Content,
        Pillar::AgentReadiness,
    ];

    /// Key used in JSON reports, baselines and history
    pub fn name(self) -> &'static str {
        match self {
            Self::Robots => "robots",
            Self::LlmsTxt => "llms_txt",
            Self::SchemaOrg => "schema_org",
            Self::Content => "content",
            Self::AgentReadiness => "agent_readiness",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Versioned table of per-pillar maxima
///
/// Tables are compile-time constants. A change in point allocation is a new
/// version, never an edit to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringScheme {
    pub version: ScoringVersion,
    pub robots_max: f64,
    pub llms_txt_max: f64,
    pub schema_org_max: f64,
    pub content_max: f64,
    /// Zero when the scheme has no agent readiness pillar
    pub agent_readiness_max: f64,
}

impl ScoringScheme {
    pub const V2: ScoringScheme = ScoringScheme {
        version: ScoringVersion::V2,
        robots_max: 25.0,
        llms_txt_max: 10.0,
        schema_org_max: 25.0,
        content_max: 40.0,
        agent_readiness_max: 0.0,
    };

    pub const V3: ScoringScheme = ScoringScheme {
        version: ScoringVersion::V3,
        robots_max: 20.0,
        llms_txt_max: 5.0,
        schema_org_max: 20.0,
        content_max: 35.0,
        agent_readiness_max: 20.0,
    };

    /// Maximum points for a pillar under this scheme
    pub fn max_for(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Robots => self.robots_max,
            Pillar::LlmsTxt => self.llms_txt_max,
            Pillar::SchemaOrg => self.schema_org_max,
            Pillar::Content => self.content_max,
            Pillar::AgentReadiness => self.agent_readiness_max,
        }
    }

    /// Pillars this scheme scores, with their maxima
    pub fn pillar_maxima(&self) -> Vec<(Pillar, f64)> {
        Pillar::ALL
            .into_iter()
            .map(|p| (p, self.max_for(p)))
            .filter(|(_, max)| *max > 0.0)
            .collect()
    }

    /// Sum of all pillar maxima; 100 for every scheme
    pub fn total(&self) -> f64 {
        self.pillar_maxima().iter().map(|(_, max)| max).sum()
    }

    /// Converts a raw (v2-scale) pillar score onto this scheme's scale
    ///
    /// Agent readiness has no v2 analog and passes through unchanged.
    pub fn rescale(&self, pillar: Pillar, raw: f64) -> f64 {
        let raw_max = ScoringScheme::V2.max_for(pillar);
        if pillar == Pillar::AgentReadiness || raw_max <= 0.0 {
            return raw;
        }
        if self.version == ScoringVersion::V2 {
            return raw;
        }
        round1(raw / raw_max * self.max_for(pillar))
    }
}

/// Content density tiering and bonuses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentRules {
    /// `(min_words, base_score)` high to low; the first satisfied tier wins
    pub word_tiers: &'static [(usize, f64)],
    pub heading_bonus: f64,
    pub list_bonus: f64,
    pub code_bonus: f64,
}

/// Structured data base score and type bonuses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemaRules {
    pub base_score: f64,
    pub high_value_types: &'static [&'static str],
    pub high_value_bonus: f64,
    pub standard_bonus: f64,
}

/// Points awarded by each agent readiness sub-signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentReadinessRules {
    pub agents_md: f64,
    pub markdown_accept: f64,
    pub mcp_endpoint: f64,
    pub semantic_html: f64,
    pub x402: f64,
    pub nlweb: f64,
}

pub const CONTENT_RULES: ContentRules = ContentRules {
    word_tiers: &[(1500, 25.0), (800, 20.0), (400, 15.0), (150, 8.0)],
    heading_bonus: 7.0,
    list_bonus: 5.0,
    code_bonus: 3.0,
};

pub const SCHEMA_RULES: SchemaRules = SchemaRules {
    base_score: 8.0,
    high_value_types: &["FAQPage", "HowTo", "Article", "Product", "Recipe"],
    high_value_bonus: 5.0,
    standard_bonus: 3.0,
};

pub const AGENT_READINESS_RULES: AgentReadinessRules = AgentReadinessRules {
    agents_md: 5.0,
    markdown_accept: 5.0,
    mcp_endpoint: 4.0,
    semantic_html: 3.0,
    x402: 2.0,
    nlweb: 1.0,
};

/// Token waste at or above this percentage fails the efficiency check
pub const MAX_CONTEXT_WASTE_PCT: f64 = 70.0;

/// Characters per token used for the token-count estimate
pub const CHARS_PER_TOKEN: usize = 4;

/// Rounds to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
