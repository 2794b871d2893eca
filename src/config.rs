//! Configuration loading
//!
//! Reads `~/.config/openlove/config.toml`. Every field has a default, so a
//! missing file is not an error; an unreadable one falls back to defaults
//! with a warning for the UI to show.

mod loader;
mod types;

pub use loader::{
    ConfigResult, ENV_API_KEY, ENV_AUTH_TOKEN, ENV_WEBHOOK_URL, apply_env_overrides, config_path,
    load_config, load_config_from_path, parse_config,
};
pub use types::{ChatConfig, Config, DEFAULT_GREETING, WebhookConfig};
