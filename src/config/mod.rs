mod init;
mod schema;

pub use init::{default_config_yaml, write_default_config};
pub use schema::Config;

use crate::decision::validate_decision;
use crate::scoring::validate_scoring;
use crate::social::validate_social;
use crate::statement::validate_statement;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/credit-scout/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("credit-scout"))
}

/// Get the default config file path (~/.config/credit-scout/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/credit-scout/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed or has unknown keys
///
/// A missing file at the default path is not an error: the built-in
/// defaults apply.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    tracing::debug!(path = %config_path.display(), "loaded config file");
    Ok(config)
}

/// Validate every section, returning all problems at once.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = validate_statement(&config.statement);
    errors.extend(validate_social(&config.social));
    if let Err(scoring) = validate_scoring(&config.scoring) {
        errors.extend(scoring);
    }
    errors.extend(validate_decision(&config.decision));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
