//! Result Validator — checks parsed model output against the declared schema.
//!
//! Supports the JSON-schema subset the Prompt Library uses: `type`,
//! `properties`, `required`, `items`, `enum`, `minItems`, `maxItems`,
//! `minimum`, `maximum`, `minLength`, `maxLength`. Output either satisfies
//! every constraint or the call fails; nothing partially typed escapes.

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::generation::invoker::GenerationResult;
use crate::generation::{GenerationError, OutputSource};
use crate::prompts::ContentType;

/// Output that satisfied its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOutput {
    pub content_type: ContentType,
    pub value: Value,
    pub source: OutputSource,
}

impl ValidatedOutput {
    /// Deserializes into the domain type for this content type.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, GenerationError> {
        serde_json::from_value(self.value).map_err(|e| GenerationError::SchemaViolation(e.to_string()))
    }
}

/// Validates a generation result. A failed result returns its recorded error.
pub fn validate(
    content_type: ContentType,
    result: &GenerationResult,
    schema: Option<&Value>,
) -> Result<ValidatedOutput, GenerationError> {
    if let Some(failure) = &result.failure {
        return Err(failure.clone());
    }
    let parsed = result
        .parsed
        .clone()
        .ok_or(GenerationError::NoStructuredOutput)?;

    let value = match schema {
        Some(schema) => conform(parsed, schema)?,
        None => parsed,
    };

    Ok(ValidatedOutput {
        content_type,
        value,
        source: OutputSource::Model,
    })
}

/// Coerces `value` toward `schema`, then checks every constraint.
pub fn conform(value: Value, schema: &Value) -> Result<Value, GenerationError> {
    let value = coerce(value, schema);
    check(&value, schema, "$").map_err(GenerationError::SchemaViolation)?;
    Ok(value)
}

fn schema_type(schema: &Value) -> Option<&str> {
    schema.get("type").and_then(Value::as_str)
}

fn required_fields(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Limited repairs for common model slips:
/// - a bare array where the schema wants `{ "<only required field>": [...] }`
/// - numbers sent as strings, and whole floats where integers are expected
/// - enum strings in the wrong case
fn coerce(value: Value, schema: &Value) -> Value {
    match schema_type(schema) {
        Some("object") => {
            let value = match value {
                Value::Array(items) => wrap_bare_array(items, schema),
                other => other,
            };
            match (value, schema.get("properties").and_then(Value::as_object)) {
                (Value::Object(map), Some(properties)) => Value::Object(
                    map.into_iter()
                        .map(|(key, field)| {
                            let field = match properties.get(&key) {
                                Some(field_schema) => coerce(field, field_schema),
                                None => field,
                            };
                            (key, field)
                        })
                        .collect(),
                ),
                (value, _) => value,
            }
        }
        Some("array") => match (value, schema.get("items")) {
            (Value::Array(items), Some(item_schema)) => {
                Value::Array(items.into_iter().map(|i| coerce(i, item_schema)).collect())
            }
            (value, _) => value,
        },
        Some("number") => match value {
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::String(s)),
            other => other,
        },
        Some("integer") => match value {
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or(Value::String(s)),
            Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        Value::Number((f as i64).into())
                    }
                    _ => Value::Number(n),
                }
            }
            other => other,
        },
        Some("string") => match (value, schema.get("enum").and_then(Value::as_array)) {
            (Value::String(s), Some(options)) => options
                .iter()
                .filter_map(Value::as_str)
                .find(|o| o.eq_ignore_ascii_case(s.trim()))
                .map(|o| Value::String(o.to_string()))
                .unwrap_or(Value::String(s)),
            (value, _) => value,
        },
        _ => value,
    }
}

fn wrap_bare_array(items: Vec<Value>, schema: &Value) -> Value {
    let required = required_fields(schema);
    let is_array_field = |name: &str| {
        schema
            .get("properties")
            .and_then(|p| p.get(name))
            .and_then(schema_type)
            == Some("array")
    };
    match required.as_slice() {
        [only] if is_array_field(only) => {
            let mut map = Map::new();
            map.insert((*only).to_string(), Value::Array(items));
            Value::Object(map)
        }
        _ => Value::Array(items),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_integer(n: &Number) -> bool {
    n.is_i64() || n.is_u64()
}

fn check(value: &Value, schema: &Value, path: &str) -> Result<(), String> {
    if let Some(expected) = schema_type(schema) {
        let matches = match expected {
            "object" => value.is_object(),
            "array" => value.is_array(),
            "string" => value.is_string(),
            "number" => value.is_number(),
            "integer" => matches!(value, Value::Number(n) if is_integer(n)),
            "boolean" => value.is_boolean(),
            _ => true,
        };
        if !matches {
            return Err(format!("{path}: expected {expected}, got {}", type_name(value)));
        }
    }

    if let Some(options) = schema.get("enum").and_then(Value::as_array) {
        if !options.contains(value) {
            return Err(format!("{path}: {value} is not one of {}", Value::Array(options.clone())));
        }
    }

    match value {
        Value::Object(map) => {
            for field in required_fields(schema) {
                if map.get(field).map_or(true, Value::is_null) {
                    return Err(format!("{path}: missing required field '{field}'"));
                }
            }
            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (key, field_schema) in properties {
                    if let Some(field) = map.get(key).filter(|f| !f.is_null()) {
                        check(field, field_schema, &format!("{path}.{key}"))?;
                    }
                }
            }
        }
        Value::Array(items) => {
            if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
                if (items.len() as u64) < min {
                    return Err(format!("{path}: expected at least {min} items, got {}", items.len()));
                }
            }
            if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
                if (items.len() as u64) > max {
                    return Err(format!("{path}: expected at most {max} items, got {}", items.len()));
                }
            }
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    check(item, item_schema, &format!("{path}[{i}]"))?;
                }
            }
        }
        Value::String(s) => {
            let len = s.trim().chars().count() as u64;
            if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
                if len < min {
                    return Err(format!("{path}: shorter than {min} characters"));
                }
            }
            if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
                if s.chars().count() as u64 > max {
                    return Err(format!("{path}: longer than {max} characters"));
                }
            }
        }
        Value::Number(n) => {
            let Some(n) = n.as_f64() else {
                return Ok(());
            };
            if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
                if n < min {
                    return Err(format!("{path}: {n} is below minimum {min}"));
                }
            }
            if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
                if n > max {
                    return Err(format!("{path}: {n} is above maximum {max}"));
                }
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::ContentType;
    use serde_json::json;

    fn ok_result(value: Value) -> GenerationResult {
        GenerationResult {
            raw: value.to_string(),
            parsed: Some(value),
            failure: None,
        }
    }

    fn feedback_schema() -> Value {
        (ContentType::AnswerFeedback.template().schema)()
    }

    fn valid_feedback() -> Value {
        json!({
            "score": 7,
            "strengths": ["Clear structure"],
            "improvements": ["Quantify the outcome"],
            "detailed_feedback": "Solid answer.",
            "sample_answer": "In my last role..."
        })
    }

    #[test]
    fn test_valid_output_passes_unchanged() {
        let schema = feedback_schema();
        let out = validate(ContentType::AnswerFeedback, &ok_result(valid_feedback()), Some(&schema)).unwrap();
        assert_eq!(out.content_type, ContentType::AnswerFeedback);
        assert_eq!(out.value, valid_feedback());
        assert_eq!(out.source, OutputSource::Model);
    }

    #[test]
    fn test_failed_result_returns_its_error() {
        let result = GenerationResult {
            raw: "oops".to_string(),
            parsed: None,
            failure: Some(GenerationError::MalformedJson("eof".to_string())),
        };
        let err = validate(ContentType::AnswerFeedback, &result, Some(&feedback_schema())).unwrap_err();
        assert_eq!(err, GenerationError::MalformedJson("eof".to_string()));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let mut value = valid_feedback();
        value.as_object_mut().unwrap().remove("detailed_feedback");
        let err = validate(ContentType::AnswerFeedback, &ok_result(value), Some(&feedback_schema())).unwrap_err();
        match err {
            GenerationError::SchemaViolation(msg) => assert!(msg.contains("detailed_feedback")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_required_field_is_rejected() {
        let mut value = valid_feedback();
        value["sample_answer"] = Value::Null;
        assert!(validate(ContentType::AnswerFeedback, &ok_result(value), Some(&feedback_schema())).is_err());
    }

    #[test]
    fn test_wrong_primitive_type_is_rejected() {
        let mut value = valid_feedback();
        value["strengths"] = json!("Clear structure");
        let err = validate(ContentType::AnswerFeedback, &ok_result(value), Some(&feedback_schema())).unwrap_err();
        assert!(matches!(err, GenerationError::SchemaViolation(msg) if msg.contains("$.strengths")));
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let mut value = valid_feedback();
        value["score"] = json!(11);
        assert!(validate(ContentType::AnswerFeedback, &ok_result(value), Some(&feedback_schema())).is_err());
    }

    #[test]
    fn test_numeric_string_is_coerced() {
        let mut value = valid_feedback();
        value["score"] = json!("8");
        let out = validate(ContentType::AnswerFeedback, &ok_result(value), Some(&feedback_schema())).unwrap();
        assert_eq!(out.value["score"], json!(8));
    }

    #[test]
    fn test_whole_float_is_coerced_to_integer() {
        let mut value = valid_feedback();
        value["score"] = json!(6.0);
        let out = validate(ContentType::AnswerFeedback, &ok_result(value), Some(&feedback_schema())).unwrap();
        assert!(out.value["score"].is_i64());
    }

    #[test]
    fn test_fractional_integer_is_rejected() {
        let mut value = valid_feedback();
        value["score"] = json!(6.5);
        assert!(validate(ContentType::AnswerFeedback, &ok_result(value), Some(&feedback_schema())).is_err());
    }

    #[test]
    fn test_bare_array_is_wrapped_into_single_required_field() {
        let schema = (ContentType::InterviewQuestions.template().schema)();
        let question = json!({
            "question": "Why Acme?",
            "category": "motivation",
            "difficulty": "Easy",
            "guidance": "Be specific."
        });
        let bare = Value::Array(vec![question; 5]);
        let out = validate(ContentType::InterviewQuestions, &ok_result(bare), Some(&schema)).unwrap();

        let questions = out.value["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0]["difficulty"], "easy");
    }

    #[test]
    fn test_enum_outside_options_is_rejected() {
        let schema = (ContentType::InterviewQuestions.template().schema)();
        let question = json!({
            "question": "Why Acme?",
            "category": "motivation",
            "difficulty": "impossible",
            "guidance": ""
        });
        let value = json!({ "questions": vec![question; 5] });
        let err = validate(ContentType::InterviewQuestions, &ok_result(value), Some(&schema)).unwrap_err();
        assert!(matches!(err, GenerationError::SchemaViolation(msg) if msg.contains("difficulty")));
    }

    #[test]
    fn test_item_count_bounds_are_enforced() {
        let schema = (ContentType::InterviewQuestions.template().schema)();
        let question = json!({
            "question": "Why Acme?",
            "category": "motivation",
            "difficulty": "easy",
            "guidance": ""
        });
        let value = json!({ "questions": vec![question; 3] });
        assert!(validate(ContentType::InterviewQuestions, &ok_result(value), Some(&schema)).is_err());
    }

    #[test]
    fn test_blank_string_fails_min_length() {
        let mut value = valid_feedback();
        value["detailed_feedback"] = json!("   ");
        assert!(validate(ContentType::AnswerFeedback, &ok_result(value), Some(&feedback_schema())).is_err());
    }

    #[test]
    fn test_no_schema_accepts_any_parsed_value() {
        let out = validate(ContentType::ResumeOptimization, &ok_result(json!([1, 2])), None).unwrap();
        assert_eq!(out.value, json!([1, 2]));
    }

    #[test]
    fn test_into_typed_reports_schema_violation() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct NeedsName {
            name: String,
        }
        let out = ValidatedOutput {
            content_type: ContentType::ResumeAnalysis,
            value: json!({"other": 1}),
            source: OutputSource::Model,
        };
        assert!(matches!(
            out.into_typed::<NeedsName>(),
            Err(GenerationError::SchemaViolation(_))
        ));
    }
}
