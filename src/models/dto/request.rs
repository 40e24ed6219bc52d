use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /api/`. Every top-level field other than `prompt` and
/// `title` is a template variable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateQuizRequestDto {
    pub prompt: Option<String>,
    pub title: Option<String>,

    #[serde(flatten)]
    pub variables: BTreeMap<String, Value>,
}

impl GenerateQuizRequestDto {
    /// Variables as substitution text. Strings are used verbatim, any other
    /// JSON value by its compact JSON rendering.
    pub fn template_variables(&self) -> BTreeMap<String, String> {
        self.variables
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extra_fields_become_variables() {
        let request: GenerateQuizRequestDto = serde_json::from_value(json!({
            "title": "Math Quiz",
            "n": "3",
            "topic": "fractions"
        }))
        .unwrap();

        assert_eq!(request.title.as_deref(), Some("Math Quiz"));
        assert!(request.prompt.is_none());

        let vars = request.template_variables();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars["n"], "3");
        assert_eq!(vars["topic"], "fractions");
    }

    #[test]
    fn test_non_string_variables_are_stringified() {
        let request: GenerateQuizRequestDto = serde_json::from_value(json!({
            "count": 5,
            "hard": true,
            "tags": ["a", "b"]
        }))
        .unwrap();

        let vars = request.template_variables();
        assert_eq!(vars["count"], "5");
        assert_eq!(vars["hard"], "true");
        assert_eq!(vars["tags"], r#"["a","b"]"#);
    }

    #[test]
    fn test_prompt_is_not_a_variable() {
        let request: GenerateQuizRequestDto = serde_json::from_value(json!({
            "prompt": "Ask about ${topic}",
            "topic": "rust"
        }))
        .unwrap();

        assert_eq!(request.prompt.as_deref(), Some("Ask about ${topic}"));
        assert!(!request.template_variables().contains_key("prompt"));
    }

    #[test]
    fn test_long_titles_are_kept_verbatim() {
        let title = "t".repeat(250);
        let request: GenerateQuizRequestDto =
            serde_json::from_value(json!({ "prompt": "x", "title": title })).unwrap();

        assert_eq!(request.title.as_deref(), Some(title.as_str()));
        assert!(request.template_variables().is_empty());
    }
}
