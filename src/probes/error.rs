use std::time::Duration;
use thiserror::Error;

/// Failure of a single probe
///
/// Never escapes an audit: the orchestrator records it in the report's
/// `errors` list and substitutes a default report.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected content type: {0}")]
    ContentType(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Failed(String),
}

/// Result type alias for probe operations
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
