// Configuration type definitions

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::suggestion::DEFAULT_CATALOG;

pub const DEFAULT_GREETING: &str = "Hi there ! I'm OpenLove AI.\nHow can I help you today?";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HISTORY_WINDOW: usize = 5;
const DEFAULT_USER_ID: &str = "openlove_user";

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_history_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_suggestions() -> Vec<String> {
    DEFAULT_CATALOG.iter().map(|q| q.to_string()).collect()
}

/// `[webhook]` section: where and how chat messages are delivered
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookConfig {
    /// Endpoint URL; chat replies fall back to a notice while unset
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Number of prior entries sent as conversation context
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Sent as `Authorization: Bearer <token>`
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Sent as `X-API-Key`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Extra headers added to every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        WebhookConfig {
            url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_id: default_user_id(),
            history_window: DEFAULT_HISTORY_WINDOW,
            auth_token: None,
            api_key: None,
            headers: BTreeMap::new(),
        }
    }
}

impl WebhookConfig {
    /// Request timeout; zero is treated as the default
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

/// `[chat]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatConfig {
    /// First assistant message of every session; empty disables it
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Question catalog for inline suggestions, in match priority order
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            greeting: default_greeting(),
            suggestions: default_suggestions(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

const MASK: &str = "********";

fn masked(secret: Option<&str>) -> String {
    match secret {
        Some(_) => format!("\"{MASK}\""),
        None => "(not set)".to_string(),
    }
}

impl Config {
    /// Human-readable dump of the effective settings with secrets masked
    pub fn redacted(&self) -> String {
        let webhook = &self.webhook;
        let mut out = String::from("[webhook]\n");
        out.push_str(&match &webhook.url {
            Some(url) => format!("url = {url:?}\n"),
            None => "url = (not set)\n".to_string(),
        });
        out.push_str(&format!("timeout_secs = {}\n", webhook.timeout().as_secs()));
        out.push_str(&format!("user_id = {:?}\n", webhook.user_id));
        out.push_str(&format!("history_window = {}\n", webhook.history_window));
        out.push_str(&format!("auth_token = {}\n", masked(webhook.auth_token.as_deref())));
        out.push_str(&format!("api_key = {}\n", masked(webhook.api_key.as_deref())));
        if !webhook.headers.is_empty() {
            out.push_str("\n[webhook.headers]\n");
            for name in webhook.headers.keys() {
                out.push_str(&format!("{name} = \"{MASK}\"\n"));
            }
        }

        out.push_str("\n[chat]\n");
        out.push_str(&format!("greeting = {:?}\n", self.chat.greeting));
        out.push_str(&format!(
            "suggestions = {} entries\n",
            self.chat.suggestions.len()
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.webhook.timeout_secs, 30);
        assert_eq!(config.webhook.history_window, 5);
        assert_eq!(config.chat.suggestions.len(), DEFAULT_CATALOG.len());
    }

    #[test]
    fn test_full_webhook_section() {
        let config: Config = toml::from_str(
            r#"
[webhook]
url = "https://n8n.example.com/webhook/openlove-ai"
timeout_secs = 45
user_id = "user_123"
history_window = 3
auth_token = "token"
api_key = "key"

[webhook.headers]
X-Workflow = "advice"
"#,
        )
        .unwrap();

        assert_eq!(
            config.webhook.url.as_deref(),
            Some("https://n8n.example.com/webhook/openlove-ai")
        );
        assert_eq!(config.webhook.timeout(), Duration::from_secs(45));
        assert_eq!(config.webhook.user_id, "user_123");
        assert_eq!(config.webhook.history_window, 3);
        assert_eq!(config.webhook.auth_token.as_deref(), Some("token"));
        assert_eq!(config.webhook.api_key.as_deref(), Some("key"));
        assert_eq!(config.webhook.headers["X-Workflow"], "advice");
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let config = WebhookConfig {
            timeout_secs: 0,
            ..WebhookConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_chat_section_overrides_catalog() {
        let config: Config = toml::from_str(
            r#"
[chat]
greeting = ""
suggestions = ["Is it love?", "Should I text first?"]
"#,
        )
        .unwrap();
        assert!(config.chat.greeting.is_empty());
        assert_eq!(config.chat.suggestions, vec!["Is it love?", "Should I text first?"]);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[webhook]\ntimeout_secs = \"soon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let mut config = Config::default();
        config.webhook.url = Some("https://example.com/hook".to_string());
        config.webhook.auth_token = Some("secret-token".to_string());
        config.webhook.headers =
            BTreeMap::from([("X-Workflow".to_string(), "private".to_string())]);

        let text = config.redacted();
        assert!(text.contains(r#"url = "https://example.com/hook""#));
        assert!(text.contains(r#"auth_token = "********""#));
        assert!(text.contains("api_key = (not set)"));
        assert!(text.contains(r#"X-Workflow = "********""#));
        assert!(!text.contains("secret-token"));
        assert!(!text.contains("private"));
        assert!(text.contains("suggestions = 20 entries"));
    }

    #[test]
    fn test_redacted_without_url() {
        let text = Config::default().redacted();
        assert!(text.starts_with("[webhook]\nurl = (not set)\n"));
        assert!(!text.contains("[webhook.headers]"));
    }

    // Missing sections and fields always parse and fall back to defaults.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_missing_fields_use_defaults(
            include_webhook_section in prop::bool::ANY,
            include_timeout in prop::bool::ANY,
            include_chat_section in prop::bool::ANY,
        ) {
            let mut toml_content = String::new();
            if include_webhook_section {
                toml_content.push_str("[webhook]\n");
                if include_timeout {
                    toml_content.push_str("timeout_secs = 40\n");
                }
            }
            if include_chat_section {
                toml_content.push_str("[chat]\n");
            }

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse config: {:?}", toml_content);
            let config = config.unwrap();

            let expected_timeout = if include_webhook_section && include_timeout { 40 } else { 30 };
            prop_assert_eq!(config.webhook.timeout_secs, expected_timeout);
            prop_assert_eq!(config.webhook.url, None);
            prop_assert_eq!(config.chat, ChatConfig::default());
        }
    }
}
