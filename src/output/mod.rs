//! Output module for rendering audit reports
//!
//! This module handles:
//! - Serializing reports as pretty JSON
//! - Rendering markdown summaries of single, site and batch reports
//! - Writing rendered output to a file

mod markdown;

pub use markdown::{
    format_batch_markdown, format_markdown, format_report_markdown, format_site_markdown,
};

use crate::audit::BatchReport;
use crate::report::AnyReport;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Rendering format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Serializes any report type as pretty-printed JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Renders one report in the requested format
pub fn render_report(report: &AnyReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Markdown => Ok(format_markdown(report)),
    }
}

/// Renders a batch in the requested format
pub fn render_batch(batch: &BatchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(batch),
        OutputFormat::Markdown => Ok(format_batch_markdown(batch)),
    }
}

/// Writes rendered output to a file
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}
