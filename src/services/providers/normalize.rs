use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Question,
};

/// Object keys that may hold the question list, in priority order.
const QUESTION_KEYS: [&str; 3] = ["questions", "quiz", "results"];

/// Parses the model's text output and extracts the question list.
///
/// A top-level array is the list itself. Otherwise the first of
/// `questions`, `quiz`, `results` holding an array wins. Anything else is an
/// empty list; only text that is not JSON at all is an error.
pub fn normalize_questions(content: &str) -> AppResult<Vec<Question>> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| {
        log::warn!("LLM returned non-JSON content: {}", e);
        AppError::ResponseFormatError("Failed to parse LLM response".to_string())
    })?;

    Ok(extract_questions(parsed))
}

fn extract_questions(parsed: Value) -> Vec<Question> {
    match parsed {
        Value::Array(items) => items,
        Value::Object(mut fields) => QUESTION_KEYS
            .iter()
            .find_map(|key| match fields.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_else(|| {
                log::warn!("LLM response has no question list; returning no questions");
                Vec::new()
            }),
        _ => Vec::new(),
    }
}
