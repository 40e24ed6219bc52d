use std::{collections::BTreeMap, path::Path, sync::Arc};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^{}]+)\}").expect("PLACEHOLDER_REGEX is a valid regex pattern")
});

/// Replaces every `${key}` whose key is present in `variables`.
///
/// A single left-to-right pass: substituted text is never scanned again, and
/// a placeholder only matches on its full name up to the first `}`.
/// Placeholders without a matching variable are copied verbatim.
pub fn resolve(template: &str, variables: &BTreeMap<String, String>) -> String {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        resolved.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let matched = after
            .find('}')
            .and_then(|end| variables.get(&after[..end]).map(|value| (end, value)));

        match matched {
            Some((end, value)) => {
                resolved.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                resolved.push_str("${");
                rest = after;
            }
        }
    }

    resolved.push_str(rest);
    resolved
}

/// Names of the `${...}` placeholders still present in `text`, in order of
/// first appearance.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for captures in PLACEHOLDER_REGEX.captures_iter(text) {
        let name = &captures[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// The default prompt, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    source: Arc<str>,
}

impl PromptTemplate {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::StartupError(format!(
                "Failed to read prompt template '{}': {}",
                path.display(),
                e
            ))
        })?;

        log::info!(
            "Loaded prompt template from {} ({} bytes)",
            path.display(),
            source.len()
        );
        Ok(Self::new(source))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Resolves `prompt` when it is non-empty, the default template otherwise.
    pub fn render(&self, prompt: Option<&str>, variables: &BTreeMap<String, String>) -> String {
        let source = prompt
            .filter(|p| !p.is_empty())
            .unwrap_or(self.source());
        resolve(source, variables)
    }
}
