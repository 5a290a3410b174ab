//! Strict parsing of generator output.
//!
//! Completions often wrap JSON in markdown fences or a sentence of prose.
//! [`extract_json`] finds the JSON value; the typed parsers then hand it to
//! the core validators. Any failure is a [`GenerationError::MalformedResponse`]
//! and nothing partial is returned.

use serde_json::Value;
use upskill_core::error::CoreError;
use upskill_core::quiz::{validate_generated_questions, GeneratedQuestion, Question};
use upskill_core::roadmap::{parse_roadmap, Roadmap};
use upskill_core::trends::{parse_trends, Trend};

use crate::error::GenerationError;

/// Extract the JSON value from a completion.
pub fn extract_json(content: &str) -> Result<Value, GenerationError> {
    let trimmed = strip_fences(content.trim());

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    // Fall back to the outermost object or array embedded in prose.
    let start = trimmed.find(['{', '[']);
    let end = trimmed.rfind(['}', ']']);
    match (start, end) {
        (Some(s), Some(e)) if e > s => serde_json::from_str(&trimmed[s..=e])
            .map_err(|e| GenerationError::MalformedResponse(format!("invalid JSON: {e}"))),
        _ => Err(GenerationError::MalformedResponse(
            "no JSON found in completion".into(),
        )),
    }
}

fn strip_fences(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn rejected(err: CoreError) -> GenerationError {
    match err {
        CoreError::Validation(msg) => GenerationError::MalformedResponse(msg),
        other => GenerationError::MalformedResponse(other.to_string()),
    }
}

/// Parse quiz questions. Accepts a bare array or `{ "questions": [...] }`.
pub fn parse_quiz_questions(content: &str) -> Result<Vec<Question>, GenerationError> {
    let value = match extract_json(content)? {
        Value::Object(mut map) => map.remove("questions").ok_or_else(|| {
            GenerationError::MalformedResponse("object has no `questions` field".into())
        })?,
        other => other,
    };

    let generated: Vec<GeneratedQuestion> = serde_json::from_value(value)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid question list: {e}")))?;

    validate_generated_questions(generated).map_err(rejected)
}

pub fn parse_roadmap_content(content: &str) -> Result<Roadmap, GenerationError> {
    parse_roadmap(extract_json(content)?).map_err(rejected)
}

pub fn parse_trends_content(content: &str) -> Result<Vec<Trend>, GenerationError> {
    parse_trends(extract_json(content)?).map_err(rejected)
}
