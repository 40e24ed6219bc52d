use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{normalize::normalize_questions, upstream_error, QuestionProvider};
use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::Question,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
    }
}

/// Gemini generate-content backend. The key travels as the `key` query
/// parameter and the model is part of the URL.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<SecretString>,
    max_output_tokens: u32,
}

impl GeminiProvider {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_base: config.gemini_api_base.clone(),
            model: config.model.clone(),
            api_key: config.gemini_api_key.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// `<base><model>:generateContent`, without the key.
    fn endpoint(&self) -> String {
        format!("{}{}:generateContent", self.api_base, self.model)
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                response_mime_type: "application/json",
            },
        }
    }
}

#[async_trait]
impl QuestionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_questions(&self, prompt: &str) -> AppResult<Vec<Question>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::ConfigurationError("GEMINI_API_KEY is not set".to_string()))?;

        let endpoint = self.endpoint();
        log::debug!("POST {}", endpoint);
        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", api_key.expose_secret())])
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| AppError::from(e.without_url()))?;

        if !response.status().is_success() {
            return Err(upstream_error(response, "Gemini", "Gemini API error").await);
        }

        let reply: GenerateContentResponse = response.json().await.map_err(|e| {
            AppError::ResponseFormatError(format!(
                "Invalid generate-content body: {}",
                e.without_url()
            ))
        })?;
        let text = reply.into_text().ok_or_else(|| {
            AppError::ResponseFormatError(
                "Missing candidates[0].content.parts[0].text in Gemini response".to_string(),
            )
        })?;

        normalize_questions(&text)
    }
}
