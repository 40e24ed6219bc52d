pub mod gemini;
pub mod normalize;
pub mod openai;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    config::{Config, ProviderKind},
    errors::{AppError, AppResult},
    models::domain::Question,
};

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// An LLM backend able to turn a resolved prompt into quiz questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate_questions(&self, prompt: &str) -> AppResult<Vec<Question>>;
}

/// Stands in for the configured provider when `LLM_PROVIDER` names a backend
/// we do not support. Every call fails with the original configuration error.
pub struct MisconfiguredProvider {
    error: AppError,
}

impl MisconfiguredProvider {
    pub fn new(error: AppError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl QuestionProvider for MisconfiguredProvider {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn generate_questions(&self, _prompt: &str) -> AppResult<Vec<Question>> {
        Err(self.error.clone())
    }
}

/// Builds the provider selected by `config.provider` around one shared HTTP
/// client.
pub fn build_provider(config: &Config) -> AppResult<Arc<dyn QuestionProvider>> {
    let kind = match config.provider_kind() {
        Ok(kind) => kind,
        Err(err) => {
            log::error!("{}; quiz generation is disabled", err);
            return Ok(Arc::new(MisconfiguredProvider::new(err)));
        }
    };

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider_timeout_secs))
        .build()
        .map_err(|e| AppError::StartupError(format!("Failed to build HTTP client: {}", e)))?;

    let provider: Arc<dyn QuestionProvider> = match kind {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(http, config)),
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(http, config)),
    };
    Ok(provider)
}

/// `{"error": {"message": ...}}`, the error envelope both providers use.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorEnvelope {
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Turns a non-success upstream reply into a `ProviderError`, preferring the
/// upstream's own message over `fallback`.
async fn upstream_error(response: reqwest::Response, provider: &str, fallback: &str) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::error!("{} returned {}: {}", provider, status, body);

    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    AppError::ProviderError(message)
}
