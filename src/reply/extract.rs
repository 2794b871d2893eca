use serde_json::{Map, Value};

/// Field names that carry the answer, in lookup priority order
pub const ANSWER_FIELDS: &[&str] = &[
    "output",
    "response",
    "message",
    "answer",
    "reply",
    "result",
    "content",
    "text",
    "ai_response",
    "data",
];

/// Object fields searched one level down when the top level has no answer
pub const WRAPPER_FIELDS: &[&str] = &[
    "data", "body", "json", "payload", "result", "response", "output",
];

/// Pull the answer text out of a webhook payload
///
/// Lookup order, first hit wins:
/// 1. a bare string payload
/// 2. a known answer field at the top level
/// 3. a known answer field inside a wrapper object
/// 4. for a list, the first element (recursively)
/// 5. the first non-blank string anywhere in the object
///
/// Blank strings never count as an answer.
pub fn extract_reply(payload: &Value) -> Option<&str> {
    match payload {
        Value::String(text) => non_blank(text),
        Value::Object(map) => answer_field(map)
            .or_else(|| {
                WRAPPER_FIELDS
                    .iter()
                    .filter_map(|name| map.get(*name)?.as_object())
                    .find_map(answer_field)
            })
            .or_else(|| first_string(payload)),
        Value::Array(items) => items.first().and_then(extract_reply),
        _ => None,
    }
}

/// Clean up extracted text for display
///
/// Strips one pair of wrapping double quotes, turns literal `\n`, `\t` and
/// `\/` sequences into the characters they name, and trims the result.
/// Markup such as `**bold**` is left alone.
pub fn normalize_reply(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unescape_literals(unquoted).trim().to_string()
}

fn answer_field(map: &Map<String, Value>) -> Option<&str> {
    ANSWER_FIELDS
        .iter()
        .find_map(|name| map.get(*name)?.as_str().and_then(non_blank))
}

fn first_string(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) => non_blank(text),
        Value::Object(map) => map.values().find_map(first_string),
        Value::Array(items) => items.iter().find_map(first_string),
        _ => None,
    }
}

fn non_blank(text: &str) -> Option<&str> {
    (!text.trim().is_empty()).then_some(text)
}

fn unescape_literals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let replacement = match chars.peek() {
            Some(&'n') => '\n',
            Some(&'t') => '\t',
            Some(&'/') => '/',
            _ => {
                out.push(ch);
                continue;
            }
        };
        out.push(replacement);
        chars.next();
    }
    out
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod extract_tests;
