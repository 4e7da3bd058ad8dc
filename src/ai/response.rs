//! AI response extraction
//!
//! The completion collaborator is asked for JSON only, but replies often carry
//! leading or trailing prose. These helpers locate the embedded object and
//! coerce its loosely-typed fields.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Failure to recover a JSON object from an AI reply
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found")]
    NoJsonObject,

    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Locate the span from the first `{` to the last `}`
///
/// Greedy on purpose: nested objects stay intact, and two sibling objects
/// produce a span that fails to parse rather than silently picking one.
pub fn extract_json_object(raw: &str) -> Result<&str, ParseError> {
    let start = raw.find('{').ok_or(ParseError::NoJsonObject)?;
    let end = raw.rfind('}').ok_or(ParseError::NoJsonObject)?;
    if end < start {
        return Err(ParseError::NoJsonObject);
    }
    Ok(&raw[start..=end])
}

/// Extract the embedded object and deserialize it into an unvalidated shape
pub fn parse_embedded<T: DeserializeOwned>(raw: &str) -> Result<T, ParseError> {
    let candidate = null_out_of_range_numbers(extract_json_object(raw)?);
    Ok(serde_json::from_str(&candidate)?)
}

/// Replace numeric literals that overflow an `f64` with `null`
///
/// `serde_json` rejects a literal like `1e400` outright. As `null` the field
/// degrades to its default like any other unusable value.
fn null_out_of_range_numbers(json: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(json.len());
    let mut changed = false;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = json.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '-' || c.is_ascii_digit() {
            let mut end = start + 1;
            while let Some(&(i, d)) = chars.peek() {
                if !(d.is_ascii_digit() || matches!(d, '.' | 'e' | 'E' | '+' | '-')) {
                    break;
                }
                end = i + 1;
                chars.next();
            }
            let literal = &json[start..end];
            match literal.parse::<f64>() {
                Ok(n) if n.is_infinite() => {
                    out.push_str("null");
                    changed = true;
                }
                _ => out.push_str(literal),
            }
            continue;
        }

        if c == '"' {
            in_string = true;
        }
        out.push(c);
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(json)
    }
}

/// Coerce a loosely-typed value to a finite number
///
/// Follows JavaScript `Number()` for the shapes a model actually emits:
/// numbers pass through, strings are trimmed and parsed (blank is zero),
/// booleans become 1/0 and null becomes zero. Anything else, and any
/// non-finite result, yields `None` so the caller can apply its default.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerce a value to non-blank text; numbers are rendered as text
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Coerce an array of loosely-typed items to text, dropping unusable items
pub fn coerce_text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| coerce_text(Some(v))).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overflowing_literals_become_null() {
        let value: Value = parse_embedded(r#"{"a":1e400,"b":-2E+999,"c":12.5,"d":"1e400"}"#).unwrap();
        assert_eq!(value, json!({"a": null, "b": null, "c": 12.5, "d": "1e400"}));
    }

    #[test]
    fn test_in_range_input_is_borrowed() {
        let raw = r#"{"a":[1,-2.5e3],"b":"x\"1e400"}"#;
        assert!(matches!(null_out_of_range_numbers(raw), Cow::Borrowed(_)));
    }

    #[test]
    fn test_extract_strips_surrounding_prose() {
        let raw = "Sure! {\"a\": {\"b\": 1}} Enjoy.";
        assert_eq!(extract_json_object(raw).unwrap(), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_extract_requires_braces_in_order() {
        assert!(matches!(extract_json_object("no json"), Err(ParseError::NoJsonObject)));
        assert!(matches!(extract_json_object("} then {"), Err(ParseError::NoJsonObject)));
        assert!(matches!(extract_json_object("only {"), Err(ParseError::NoJsonObject)));
    }

    #[test]
    fn test_parse_embedded_reports_malformed_span() {
        let result: Result<Value, _> = parse_embedded("{\"a\": 1} and {\"b\": 2}");
        assert!(matches!(result, Err(ParseError::MalformedJson(_))));
    }

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(ParseError::NoJsonObject.to_string(), "no JSON object found");
        let err: Result<Value, _> = parse_embedded("{oops}");
        assert!(err.unwrap_err().to_string().starts_with("malformed JSON"));
    }

    #[test]
    fn test_coerce_number_like_javascript() {
        assert_eq!(coerce_number(Some(&json!(12.5))), Some(12.5));
        assert_eq!(coerce_number(Some(&json!(" 250 "))), Some(250.0));
        assert_eq!(coerce_number(Some(&json!(""))), Some(0.0));
        assert_eq!(coerce_number(Some(&json!(true))), Some(1.0));
        assert_eq!(coerce_number(Some(&json!(null))), Some(0.0));
        assert_eq!(coerce_number(Some(&json!("about 20"))), None);
        assert_eq!(coerce_number(Some(&json!("Infinity"))), None);
        assert_eq!(coerce_number(Some(&json!([1]))), None);
        assert_eq!(coerce_number(None), None);
    }

    #[test]
    fn test_coerce_text() {
        assert_eq!(coerce_text(Some(&json!("  Squat "))), Some("Squat".to_string()));
        assert_eq!(coerce_text(Some(&json!(12))), Some("12".to_string()));
        assert_eq!(coerce_text(Some(&json!("   "))), None);
        assert_eq!(coerce_text(Some(&json!({"x": 1}))), None);
    }

    #[test]
    fn test_coerce_text_list_drops_unusable_items() {
        let value = json!(["Dumbbells", 2, null, "", {"x": 1}, "Bench"]);
        assert_eq!(coerce_text_list(Some(&value)), vec!["Dumbbells", "2", "Bench"]);
        assert!(coerce_text_list(Some(&json!("Dumbbells"))).is_empty());
        assert!(coerce_text_list(None).is_empty());
    }
}
