use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::AnalysisResult;

/// The model's reply did not match the requested feedback shape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResponseError {
    #[error("model reply is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("model reply is not a JSON object")]
    NotAnObject,
    #[error("model reply does not match the analysis shape: {0}")]
    Shape(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ModelVerdict {
    success: bool,
    message: String,
    #[serde(default)]
    details: Option<String>,
}

/// Remove raw line breaks from a model reply before JSON parsing.
///
/// Models often pretty-print the object or put literal line breaks inside
/// string values, which is invalid JSON. Breaks between tokens are dropped;
/// breaks inside string literals become `\n` / `\r` escapes so the decoded
/// text keeps them.
#[must_use]
pub fn strip_line_breaks(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in raw.chars() {
        if !in_string {
            match ch {
                '\n' | '\r' => {}
                '"' => {
                    in_string = true;
                    out.push(ch);
                }
                _ => out.push(ch),
            }
            continue;
        }

        if escaped {
            escaped = false;
            match ch {
                '\n' => out.push('n'),
                '\r' => out.push('r'),
                _ => out.push(ch),
            }
            continue;
        }

        match ch {
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '"' => {
                in_string = false;
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }

    out
}

/// Parse the model's text reply into feedback.
///
/// The reply must be a JSON object with a boolean `success`, a string
/// `message`, and an optional string `details`. Extra keys are ignored.
///
/// # Errors
///
/// Returns `ResponseError` if the reply is not JSON, not an object, or does
/// not carry the expected fields.
pub fn parse_model_reply(raw: &str) -> Result<AnalysisResult, ResponseError> {
    let cleaned = strip_line_breaks(raw);
    let value: Value = serde_json::from_str(cleaned.trim()).map_err(ResponseError::InvalidJson)?;
    if !value.is_object() {
        return Err(ResponseError::NotAnObject);
    }
    let verdict: ModelVerdict = serde_json::from_value(value).map_err(ResponseError::Shape)?;
    Ok(AnalysisResult::new(
        verdict.success,
        verdict.message,
        verdict.details,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_reply_is_forwarded_unchanged() {
        let result = parse_model_reply(r#"{"success":true,"message":"ok","details":"d"}"#).unwrap();
        assert_eq!(result, AnalysisResult::new(true, "ok", Some("d".into())));
    }

    #[test]
    fn pretty_printed_reply_parses() {
        let raw = "{\r\n  \"success\": false,\r\n  \"message\": \"Zwei Fakten fehlen\",\r\n  \"details\": \"- Konsuln\"\r\n}\r\n";
        let result = parse_model_reply(raw).unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "Zwei Fakten fehlen");
        assert_eq!(result.details.as_deref(), Some("- Konsuln"));
    }

    #[test]
    fn raw_line_breaks_inside_strings_are_preserved() {
        let raw = "{\"success\":true,\"message\":\"ok\",\"details\":\"1. first\n2. second\"}";
        let result = parse_model_reply(raw).unwrap();
        assert_eq!(result.details.as_deref(), Some("1. first\n2. second"));
    }

    #[test]
    fn escaped_sequences_are_left_alone() {
        let raw = r#"{"success":true,"message":"say \"hi\"","details":"a\nb \\ c"}"#;
        let result = parse_model_reply(raw).unwrap();
        assert_eq!(result.message, "say \"hi\"");
        assert_eq!(result.details.as_deref(), Some("a\nb \\ c"));
    }

    #[test]
    fn details_may_be_missing_or_null() {
        let result = parse_model_reply(r#"{"success":true,"message":"ok"}"#).unwrap();
        assert_eq!(result.details, None);
        let result =
            parse_model_reply(r#"{"success":true,"message":"ok","details":null}"#).unwrap();
        assert_eq!(result.details, None);
    }

    #[test]
    fn non_json_reply_is_an_error() {
        let err = parse_model_reply("Great answer, well done!").unwrap_err();
        assert!(matches!(err, ResponseError::InvalidJson(_)));
        assert!(err.to_string().starts_with("model reply is not valid JSON"));
    }

    #[test]
    fn arrays_are_rejected_even_with_matching_arity() {
        let err = parse_model_reply(r#"[true, "ok", "d"]"#).unwrap_err();
        assert!(matches!(err, ResponseError::NotAnObject));
    }

    #[test]
    fn wrong_field_types_are_rejected() {
        let err = parse_model_reply(r#"{"success":"yes","message":"ok"}"#).unwrap_err();
        assert!(matches!(err, ResponseError::Shape(_)));
        let err = parse_model_reply(r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, ResponseError::Shape(_)));
    }

    #[test]
    fn strip_drops_breaks_between_tokens_only() {
        assert_eq!(strip_line_breaks("{\n\"a\":\n1\r\n}"), "{\"a\":1}");
        assert_eq!(strip_line_breaks("\"x\ny\""), "\"x\\ny\"");
    }
}
