use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Response format error: {0}")]
    ResponseFormatError(String),

    #[error("Startup error: {0}")]
    StartupError(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConfigurationError(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ProviderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ResponseFormatError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StartupError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ProviderError("request to provider timed out".to_string())
        } else {
            AppError::ProviderError(err.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
