//! Configuration module for Context-Lint
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use context_lint::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("context-lint.toml")).unwrap();
//! println!("Auditing up to {} pages per site", config.audit.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AuditConfig, Config, HistoryConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
