//! Informational signals: reported but never scored

use serde::{Deserialize, Serialize};

/// `Content-Usage` response header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentUsageReport {
    pub header_found: bool,
    pub header_value: Option<String>,
    /// Parsed `train-ai=y|n`, when present
    pub allows_training: Option<bool>,
    pub detail: String,
}

/// Really Simple Licensing directive in robots.txt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RslReport {
    pub indicators_found: bool,
    pub license_url: Option<String>,
    pub detail: String,
}

/// Experience/expertise/authority/trust markers in page HTML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EeatReport {
    pub has_author: bool,
    pub has_date: bool,
    pub has_about_page: bool,
    pub has_contact_info: bool,
    pub has_citations: bool,
    pub trust_signals: usize,
    pub detail: String,
}
