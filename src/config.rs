use std::{env, fmt, str::FromStr};

use secrecy::SecretString;

use crate::{
    constants::{
        providers::{
            DEFAULT_PROVIDER_TIMEOUT_SECS, GEMINI_DEFAULT_API_BASE, GEMINI_DEFAULT_MODEL,
            OPENAI_DEFAULT_ENDPOINT, OPENAI_DEFAULT_MODEL,
        },
        quiz_prompt::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_PROMPT_TEMPLATE_PATH, DEFAULT_QUIZ_TITLE},
    },
    errors::AppError,
};

/// LLM backends the relay knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => OPENAI_DEFAULT_MODEL,
            ProviderKind::Gemini => GEMINI_DEFAULT_MODEL,
        }
    }

    /// Name of the environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(AppError::ConfigurationError(format!(
                "Unsupported provider '{}' (expected 'openai' or 'gemini')",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub provider: String,
    pub model: String,
    pub openai_endpoint: String,
    pub openai_api_key: Option<SecretString>,
    pub gemini_api_base: String,
    pub gemini_api_key: Option<SecretString>,
    pub max_output_tokens: u32,
    pub provider_timeout_secs: u64,
    pub prompt_template_path: String,
    pub static_dir: String,
    pub default_title: String,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = get("LLM_PROVIDER").unwrap_or_else(|| ProviderKind::OpenAi.to_string());
        let model = get("LLM_MODEL").unwrap_or_else(|| {
            provider
                .parse::<ProviderKind>()
                .unwrap_or(ProviderKind::OpenAi)
                .default_model()
                .to_string()
        });

        Self {
            provider,
            model,
            openai_endpoint: get("OPENAI_API_ENDPOINT")
                .unwrap_or_else(|| OPENAI_DEFAULT_ENDPOINT.to_string()),
            openai_api_key: get("OPENAI_API_KEY").map(SecretString::from),
            gemini_api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| GEMINI_DEFAULT_API_BASE.to_string()),
            gemini_api_key: get("GEMINI_API_KEY").map(SecretString::from),
            max_output_tokens: get("MAX_OUTPUT_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            provider_timeout_secs: get("PROVIDER_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
            prompt_template_path: get("PROMPT_TEMPLATE_PATH")
                .unwrap_or_else(|| DEFAULT_PROMPT_TEMPLATE_PATH.to_string()),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "public".to_string()),
            default_title: get("QUIZ_DEFAULT_TITLE")
                .unwrap_or_else(|| DEFAULT_QUIZ_TITLE.to_string()),
            web_server_host: get("WEB_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_server_port: get("WEB_SERVER_PORT")
                .or_else(|| get("PORT"))
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    pub fn provider_kind(&self) -> Result<ProviderKind, AppError> {
        self.provider.parse()
    }

    /// Returns the environment variable that should hold the selected
    /// provider's key when that key is missing.
    pub fn missing_credentials(&self) -> Option<&'static str> {
        let kind = self.provider_kind().ok()?;
        let key = match kind {
            ProviderKind::OpenAi => &self.openai_api_key,
            ProviderKind::Gemini => &self.gemini_api_key,
        };
        key.is_none().then(|| kind.api_key_var())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "test-model".to_string(),
            openai_endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            openai_api_key: Some(SecretString::from("test-openai-key".to_string())),
            gemini_api_base: "http://127.0.0.1:9/models/".to_string(),
            gemini_api_key: Some(SecretString::from("test-gemini-key".to_string())),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            provider_timeout_secs: 5,
            prompt_template_path: DEFAULT_PROMPT_TEMPLATE_PATH.to_string(),
            static_dir: "public".to_string(),
            default_title: DEFAULT_QUIZ_TITLE.to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 10000,
        }
    }
}
