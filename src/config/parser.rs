use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses and validates configuration from TOML text
///
/// Every section is optional; missing keys take their defaults.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads and validates a configuration file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use context_lint::config::load_config;
///
/// let config = load_config(Path::new("context-lint.toml")).unwrap();
/// println!("Max pages: {}", config.audit.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Hex-encoded SHA-256 of the configuration file content
///
/// Stored with history rows so audits run under different settings can be
/// told apart.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    Ok(hash_content(&std::fs::read_to_string(path)?))
}

fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Loads a configuration together with the hash of the exact text parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}
