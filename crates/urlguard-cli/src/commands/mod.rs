//! CLI command implementations for `urlguard`.
//!
//! - [`serve`] -- HTTP service.
//! - [`predict`] -- One-off classification.
//! - [`encode`] -- Encoder inspection.
//! - [`history`] -- Prediction log listing.
//! - [`config_cmd`] -- Resolved configuration.

pub mod config_cmd;
pub mod encode;
pub mod history;
pub mod predict;
pub mod serve;

use std::path::{Path, PathBuf};

use urlguard_types::config::Config;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "URLGUARD_CONFIG";

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG: &str = "urlguard.json";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` flag; the file must exist.
    Explicit(PathBuf),
    /// `URLGUARD_CONFIG` or `./urlguard.json`; may be absent.
    Discovered(PathBuf),
    /// Nothing found, use built-in defaults.
    Defaults,
}

/// Resolve the config source.
///
/// Order: `--config`, then `URLGUARD_CONFIG`, then `./urlguard.json` if it
/// exists, else defaults.
pub fn config_source(config_override: Option<&str>) -> ConfigSource {
    if let Some(path) = config_override {
        return ConfigSource::Explicit(PathBuf::from(path));
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return ConfigSource::Discovered(PathBuf::from(path));
    }
    let local = Path::new(LOCAL_CONFIG);
    if local.exists() {
        return ConfigSource::Discovered(local.to_path_buf());
    }
    ConfigSource::Defaults
}

/// Load configuration from the given path override or via discovery,
/// then apply environment overrides and validate.
///
/// A discovered path that does not exist falls back to defaults; an
/// explicit `--config` path that does not exist is an error.
pub fn load_config(config_override: Option<&str>) -> anyhow::Result<Config> {
    let mut config = match config_source(config_override) {
        ConfigSource::Explicit(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            read_config(&path)?
        }
        ConfigSource::Discovered(path) if path.exists() => read_config(&path)?,
        ConfigSource::Discovered(path) => {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            Config::default()
        }
        ConfigSource::Defaults => Config::default(),
    };

    config
        .apply_env_overrides(|key| std::env::var(key).ok())
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    config.validate().map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config {}: {e}", path.display()))?;
    Config::from_json(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config {}: {e}", path.display()))
}
