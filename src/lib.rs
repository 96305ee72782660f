//! Context-Lint: AI-readiness auditing for web pages and sites
//!
//! This crate audits how ready a page (or a sampled set of pages on a site) is
//! to be consumed by AI crawlers and agents. Independent probes run
//! concurrently, per-pillar scores are computed under a versioned scoring
//! scheme, multi-page results are aggregated with depth weighting, and
//! scores can be compared against earlier audits.

pub mod audit;
pub mod compare;
pub mod config;
pub mod crawler;
pub mod discovery;
pub mod history;
pub mod output;
pub mod probes;
pub mod report;
pub mod robots;
pub mod scoring;
pub mod url;

use thiserror::Error;

/// Main error type for Context-Lint operations
///
/// Network problems inside an audit never surface here; they are recorded in
/// the report's `errors` list instead. These variants cover caller-boundary
/// failures (bad input, unreadable files, storage).
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("History error: {0}")]
    History(#[from] history::HistoryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown scoring version: {0}")]
    UnknownScoringVersion(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Context-Lint operations
pub type Result<T> = std::result::Result<T, ContextError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use audit::{run_batch, AuditMode, AuditOptions, Auditor, BatchReport};
pub use compare::{compare, AuditPolicy, RegressionResult};
pub use config::Config;
pub use report::{AuditReport, SiteAuditReport};
pub use scoring::{ScoringScheme, ScoringVersion};
