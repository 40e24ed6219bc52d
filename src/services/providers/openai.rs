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
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_completion_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

/// OpenAI-compatible chat-completions backend. The prompt goes out as the
/// system message and the reply is requested as a JSON object.
pub struct OpenAiProvider {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
    max_output_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            endpoint: config.openai_endpoint.clone(),
            model: config.model.clone(),
            api_key: config.openai_api_key.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "system",
                content: prompt,
            }],
            max_completion_tokens: self.max_output_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

#[async_trait]
impl QuestionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate_questions(&self, prompt: &str) -> AppResult<Vec<Question>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::ConfigurationError("OPENAI_API_KEY is not set".to_string()))?;

        log::debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, "OpenAI", "OpenAI API error").await);
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::ResponseFormatError(format!("Invalid chat completion body: {}", e))
        })?;
        let content = completion.into_content().ok_or_else(|| {
            AppError::ResponseFormatError(
                "Missing choices[0].message.content in chat completion".to_string(),
            )
        })?;

        normalize_questions(&content)
    }
}
