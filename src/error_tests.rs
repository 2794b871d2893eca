//! Tests for OpenLoveError type

use super::*;

#[test]
fn test_webhook_not_configured_display() {
    let msg = OpenLoveError::WebhookNotConfigured.to_string();
    assert!(msg.contains("Webhook URL not configured"));
    assert!(msg.contains("OPENLOVE_WEBHOOK_URL"));
}

#[test]
fn test_invalid_config_display() {
    let error = OpenLoveError::InvalidConfig {
        path: PathBuf::from("/tmp/config.toml"),
        message: "expected `=`".to_string(),
    };
    let msg = error.to_string();
    assert!(msg.contains("/tmp/config.toml"));
    assert!(msg.contains("expected `=`"));
}

#[test]
fn test_invalid_header_display() {
    let error = OpenLoveError::InvalidHeader {
        name: "X Bad".to_string(),
        message: "invalid HTTP header name".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid header X Bad: invalid HTTP header name"
    );
}

#[test]
fn test_error_debug() {
    let debug_str = format!("{:?}", OpenLoveError::WebhookNotConfigured);
    assert!(debug_str.contains("WebhookNotConfigured"));
}
