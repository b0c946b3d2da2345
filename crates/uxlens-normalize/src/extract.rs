//! Locating the JSON payload inside model text
//!
//! Two strategies, tried in order:
//!
//! 1. the body of the first fenced block opened with a `json` marker;
//! 2. the span from the first `{` to the last `}` (greedy, outermost braces).
//!
//! When both fail the text is rejected. No deeper recovery is attempted:
//! a guessed payload could silently corrupt stored metrics.

use crate::error::{NormalizeError, NormalizeResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```json[ \t]*\r?\n?(.*?)```").expect("fenced block pattern"));

static OUTER_BRACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("brace span pattern"));

/// Locate the JSON payload in `text`
///
/// # Errors
/// [`NormalizeError::InvalidResponseFormat`] when neither strategy matches.
pub fn extract_json(text: &str) -> NormalizeResult<&str> {
    if let Some(body) = FENCED_JSON
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|body| !body.is_empty())
    {
        return Ok(body);
    }

    if let Some(span) = OUTER_BRACES.find(text) {
        return Ok(span.as_str());
    }

    tracing::debug!(len = text.len(), "no JSON payload found in model response");
    Err(NormalizeError::invalid_format(text))
}

/// Extract and parse the payload as a JSON object
///
/// # Errors
/// Format error when no payload is found, parse error when it is not valid
/// JSON, [`NormalizeError::NotAnObject`] when it is valid JSON of another type.
pub fn extract_object(text: &str) -> NormalizeResult<Value> {
    let payload = extract_json(text)?;
    let value: Value = serde_json::from_str(payload)?;
    match value {
        Value::Object(_) => Ok(value),
        other => Err(NormalizeError::NotAnObject {
            found: json_type(&other),
        }),
    }
}

/// Extract, parse and deserialize the payload into `T`
///
/// # Errors
/// As [`extract_object`], plus a parse error when the object does not fit `T`.
pub fn parse_response<T: DeserializeOwned>(text: &str) -> NormalizeResult<T> {
    let value = extract_object(text)?;
    Ok(serde_json::from_value(value)?)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_fenced_block() {
        let text = "Here is the analysis:\n```json\n{\"a\": 1}\n```\nHope it helps!";
        assert_eq!(extract_json(text).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn fenced_marker_is_case_insensitive() {
        let text = "```JSON\n{\"a\": 2}\n```";
        assert_eq!(extract_json(text).unwrap(), "{\"a\": 2}");
    }

    #[test]
    fn fenced_block_wins_over_braces_in_prose() {
        let text = "Note {not json} first\n```json\n{\"a\": 3}\n```";
        assert_eq!(extract_json(text).unwrap(), "{\"a\": 3}");
    }

    #[test]
    fn falls_back_to_outer_braces() {
        let text = "Sure! {\"outer\": {\"inner\": true}} Let me know.";
        assert_eq!(
            extract_json(text).unwrap(),
            "{\"outer\": {\"inner\": true}}"
        );
    }

    #[test]
    fn empty_fence_falls_back_to_braces() {
        let text = "```json\n```\n{\"a\": 4}";
        assert_eq!(extract_json(text).unwrap(), "{\"a\": 4}");
    }

    #[test]
    fn no_payload_is_format_error() {
        let err = extract_json("I could not analyse this image.").unwrap_err();
        assert!(err.is_format_error());

        let err = extract_json("").unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn greedy_span_with_prose_braces_is_parse_error() {
        // Two separate objects: the greedy span covers both and is not JSON.
        let err = extract_object("{\"a\": 1} and also {\"b\": 2}").unwrap_err();
        assert!(matches!(err, NormalizeError::Parse(_)));
    }

    #[test]
    fn fenced_array_is_not_an_object() {
        let err = extract_object("```json\n[1, 2, 3]\n```").unwrap_err();
        assert!(matches!(err, NormalizeError::NotAnObject { found: "array" }));
    }

    #[test]
    fn extract_object_parses() {
        let value = extract_object("prefix {\"score\": 80} suffix").unwrap();
        assert_eq!(value, json!({"score": 80}));
    }
}
