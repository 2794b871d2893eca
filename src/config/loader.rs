use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::OpenLoveError;

const CONFIG_DIR: &str = "openlove";
const CONFIG_FILE: &str = "config.toml";

pub const ENV_WEBHOOK_URL: &str = "OPENLOVE_WEBHOOK_URL";
pub const ENV_AUTH_TOKEN: &str = "OPENLOVE_AUTH_TOKEN";
pub const ENV_API_KEY: &str = "OPENLOVE_API_KEY";

/// Loaded configuration plus a problem worth telling the user about
#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load from `path` (or the default location) and apply environment
/// overrides for deployment secrets
pub fn load_config(path: Option<&Path>) -> ConfigResult {
    let mut result = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(path) => load_config_from_path(&path),
        None => ConfigResult::default(),
    };
    apply_env_overrides(&mut result.config, |key| std::env::var(key).ok());
    result
}

pub fn load_config_from_path(path: &Path) -> ConfigResult {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No config file at {}", path.display());
            return ConfigResult::default();
        }
        Err(e) => {
            let warning = format!("Could not read {}: {}", path.display(), e);
            log::warn!("{}", warning);
            return ConfigResult {
                config: Config::default(),
                warning: Some(warning),
            };
        }
    };

    match parse_config(&contents, path) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::warn!("{}", e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("{e}. Using defaults.")),
            }
        }
    }
}

pub fn parse_config(content: &str, path: &Path) -> Result<Config, OpenLoveError> {
    toml::from_str(content).map_err(|e| OpenLoveError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}

/// Overlay webhook URL and credentials from the environment
///
/// Blank values are ignored so an exported-but-empty variable does not
/// erase a configured value.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = value(ENV_WEBHOOK_URL) {
        config.webhook.url = Some(url);
    }
    if let Some(token) = value(ENV_AUTH_TOKEN) {
        config.webhook.auth_token = Some(token);
    }
    if let Some(key) = value(ENV_API_KEY) {
        config.webhook.api_key = Some(key);
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod loader_tests;
