use crate::compare::AuditPolicy;
use crate::config::types::{AuditConfig, Config, HistoryConfig, UserAgentConfig};
use crate::scoring::ScoringVersion;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_audit_config(&config.audit)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_policy(&config.policy)?;
    validate_history_config(&config.history)?;
    Ok(())
}

/// Validates audit configuration
fn validate_audit_config(config: &AuditConfig) -> Result<(), ConfigError> {
    if !(1..=300).contains(&config.timeout_seconds) {
        return Err(ConfigError::Validation(format!(
            "timeout-seconds must be between 1 and 300, got {}",
            config.timeout_seconds
        )));
    }

    if !(1..=250).contains(&config.max_pages) {
        return Err(ConfigError::Validation(format!(
            "max-pages must be between 1 and 250, got {}",
            config.max_pages
        )));
    }

    if !(0.0..=60.0).contains(&config.delay_seconds) {
        return Err(ConfigError::Validation(format!(
            "delay-seconds must be between 0 and 60, got {}",
            config.delay_seconds
        )));
    }

    if !(1..=50).contains(&config.concurrency) {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 50, got {}",
            config.concurrency
        )));
    }

    if config.site_deadline_seconds < 1 {
        return Err(ConfigError::Validation(
            "site-deadline-seconds must be >= 1".to_string(),
        ));
    }

    config.scoring_version.parse::<ScoringVersion>()?;

    if let Some(bots) = &config.bots {
        if bots.is_empty() {
            return Err(ConfigError::Validation(
                "bots cannot be an empty list".to_string(),
            ));
        }
        if let Some(bot) = bots.iter().find(|b| b.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "bot names cannot be blank, got '{}'",
                bot
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Name: non-empty, alphanumeric + hyphens only
    if config.name.is_empty() {
        return Err(ConfigError::Validation("name cannot be empty".to_string()));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.is_empty() {
        return Err(ConfigError::Validation(
            "version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::Validation(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

/// Validates policy minimums: every set value must be a non-negative score
fn validate_policy(policy: &AuditPolicy) -> Result<(), ConfigError> {
    let minimums = [
        ("robots-min", policy.robots_min),
        ("llms-min", policy.llms_min),
        ("schema-min", policy.schema_min),
        ("content-min", policy.content_min),
        ("overall-min", policy.overall_min),
    ];

    for (name, value) in minimums {
        if let Some(value) = value {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }
    }

    if let Some(waste) = policy.max_context_waste {
        if !(0.0..=100.0).contains(&waste) {
            return Err(ConfigError::Validation(format!(
                "max-context-waste must be between 0 and 100, got {}",
                waste
            )));
        }
    }

    Ok(())
}

/// Validates history configuration
fn validate_history_config(config: &HistoryConfig) -> Result<(), ConfigError> {
    if config.regression_threshold < 0.0 {
        return Err(ConfigError::Validation(format!(
            "regression-threshold must be >= 0, got {}",
            config.regression_threshold
        )));
    }

    if let Some(path) = &config.database_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "database-path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
