//! Configuration loading functionality.
//!
//! Resolves the configuration path, parses the TOML file, validates it and fills
//! unset fields with defaults. A missing file is not an error: every field has a
//! default.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::Config;
use super::validation::validate_config;
use crate::common::constants::*;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Get the configuration file path, honoring `--config`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(dir) = get_custom_config_dir() {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// Returns the defaults when the file does not exist.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        log_debug!(
            "No configuration at {}, using defaults",
            config_path.display()
        );
        let mut config = Config::default();
        apply_defaults(&mut config);
        return Ok(config);
    }

    load_from_path(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}

/// Load configuration from a specific path. The file must exist.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    validate_config(&config)?;
    apply_defaults(&mut config);

    Ok(config)
}

/// Apply default values to unset timer fields.
fn apply_defaults(config: &mut Config) {
    config.focus_minutes.get_or_insert(DEFAULT_FOCUS_MINUTES);
    config.break_minutes.get_or_insert(DEFAULT_BREAK_MINUTES);
    config
        .long_break_minutes
        .get_or_insert(DEFAULT_LONG_BREAK_MINUTES);
    config.rounds.get_or_insert(DEFAULT_ROUNDS);
    config.autorun.get_or_insert(DEFAULT_AUTORUN);
}
