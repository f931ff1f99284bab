use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use crate::models::OutputLanguage;

/// API Error with rich context and automatic error trait implementations
///
/// Each variant carries the context needed to render a localized message.
#[derive(Error, Debug)]
pub enum ApiError {
    // Validation errors 4xxx
    #[error("Unsupported language: {0}")]
    InvalidLanguage(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ApiError {
    /// Helper to create invalid language error
    pub fn invalid_language(value: impl Into<String>) -> Self {
        Self::InvalidLanguage(value.into())
    }

    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::InvalidLanguage(_) => 4001,
            Self::ValidationError(_) => 4002,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error_code() {
            4001..=4999 => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message rendered in the given output language
    pub fn localized_message(&self, language: OutputLanguage) -> String {
        let locale = language.as_str();
        match self {
            Self::InvalidLanguage(value) => {
                t!("validation.invalid_language", locale = locale, value = value).to_string()
            },
            Self::ValidationError(details) => {
                t!("validation.failed", locale = locale, details = details).to_string()
            },
        }
    }

    /// Attach the language the error body should be rendered in
    pub fn localized(self, language: OutputLanguage) -> LocalizedApiError {
        LocalizedApiError { error: self, language }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
}

/// An `ApiError` paired with the request's output language.
#[derive(Debug)]
pub struct LocalizedApiError {
    pub error: ApiError,
    pub language: OutputLanguage,
}

impl IntoResponse for LocalizedApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let code = self.error.error_code();
        let message = self.error.localized_message(self.language);

        tracing::debug!("Request rejected: {}", self.error);

        let response = ApiErrorResponse { code, message };

        (status, Json(response)).into_response()
    }
}
