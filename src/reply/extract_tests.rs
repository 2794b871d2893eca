//! Tests for webhook response extraction and normalization

use super::*;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn test_output_field_is_returned_unmodified() {
    let payload = json!({"output": "**bold** text"});
    assert_eq!(extract_reply(&payload), Some("**bold** text"));
}

#[test]
fn test_bare_string_payload() {
    let payload = json!("plain string");
    assert_eq!(extract_reply(&payload), Some("plain string"));
}

#[test]
fn test_list_uses_first_element() {
    let payload = json!([{"message": "hi"}, {"message": "ignored"}]);
    assert_eq!(extract_reply(&payload), Some("hi"));
}

#[test]
fn test_empty_object_has_no_reply() {
    assert_eq!(extract_reply(&json!({})), None);
    assert_eq!(extract_reply(&json!([])), None);
    assert_eq!(extract_reply(&json!(null)), None);
    assert_eq!(extract_reply(&json!(42)), None);
}

#[test]
fn test_field_priority_follows_declared_order() {
    let payload = json!({"message": "second", "output": "first"});
    assert_eq!(extract_reply(&payload), Some("first"));
}

#[test]
fn test_original_ai_response_field() {
    let payload = json!({"ai_response": "from the workflow"});
    assert_eq!(extract_reply(&payload), Some("from the workflow"));
}

#[test]
fn test_blank_field_falls_through() {
    let payload = json!({"output": "  ", "reply": "real answer"});
    assert_eq!(extract_reply(&payload), Some("real answer"));
}

#[test]
fn test_wrapper_object_searched_before_deep_fallback() {
    // A depth-first scan would hit "noise" first (keys are sorted)
    let payload = json!({"aaa": "noise", "payload": {"reply": "wrapped"}});
    assert_eq!(extract_reply(&payload), Some("wrapped"));
}

#[test]
fn test_data_wrapper() {
    let payload = json!({"data": {"answer": "nested answer"}, "status": "ok"});
    assert_eq!(extract_reply(&payload), Some("nested answer"));
}

#[test]
fn test_deep_fallback_finds_any_string() {
    let payload = json!({"choices": [{"delta": {"txt": "deep"}}], "count": 1});
    assert_eq!(extract_reply(&payload), Some("deep"));
}

#[test]
fn test_list_of_strings() {
    assert_eq!(extract_reply(&json!(["first", "second"])), Some("first"));
}

#[test]
fn test_normalize_strips_wrapping_quotes() {
    assert_eq!(normalize_reply("\"quoted reply\""), "quoted reply");
    // Only one pair
    assert_eq!(normalize_reply("\"\"twice\"\""), "\"twice\"");
}

#[test]
fn test_normalize_unescapes_literal_sequences() {
    assert_eq!(
        normalize_reply(r"Line one\nLine two\tTabbed https:\/\/example.com"),
        "Line one\nLine two\tTabbed https://example.com"
    );
}

#[test]
fn test_normalize_keeps_other_backslashes() {
    assert_eq!(normalize_reply(r"C:\Users\x"), r"C:\Users\x");
    assert_eq!(normalize_reply(r"ends with \"), r"ends with \");
}

#[test]
fn test_normalize_trims_after_unescape() {
    assert_eq!(normalize_reply(r"  \n  hello \n"), "hello");
}

#[test]
fn test_normalize_leaves_markup() {
    assert_eq!(normalize_reply("**bold** text"), "**bold** text");
}

#[test]
fn test_normalize_single_quote_char() {
    assert_eq!(normalize_reply("\""), "\"");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Whatever answer field the workflow uses, the text comes back verbatim.
    #[test]
    fn prop_any_answer_field_is_found(
        field in prop::sample::select(ANSWER_FIELDS.to_vec()),
        text in "[a-zA-Z0-9][a-zA-Z0-9 .,!?]{0,40}",
        wrapped in prop::bool::ANY,
    ) {
        let mut inner = serde_json::Map::new();
        inner.insert(field.to_string(), json!(text.clone()));
        let payload = if wrapped {
            json!({"body": serde_json::Value::Object(inner)})
        } else {
            serde_json::Value::Object(inner)
        };
        prop_assert_eq!(extract_reply(&payload), Some(text.as_str()));
    }

    #[test]
    fn prop_normalized_text_is_trimmed(text in "[ a-z\"]{0,30}") {
        let normalized = normalize_reply(&text);
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }
}
