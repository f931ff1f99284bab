//! Output Language Handlers
//!
//! REST API endpoints that expose how a request's output language is
//! resolved and the instruction sentence used for text generation.

use axum::{Json, extract::rejection::JsonRejection};
use serde::Serialize;
use utoipa::ToSchema;

use crate::middleware::RequestLanguage;
use crate::models::{InstructionReq, InstructionResp, LanguageResp, OutputLanguage};
use crate::services::language::{
    append_output_language_instruction, build_output_language_instruction,
};
use crate::utils::{ApiError, LocalizedApiError};

/// Resolved output language of the current request
/// GET /api/language
#[utoipa::path(
    get,
    path = "/api/language",
    responses(
        (status = 200, description = "Resolved output language", body = LanguageResp)
    ),
    tag = "Language"
)]
pub async fn get_language(RequestLanguage(language): RequestLanguage) -> Json<LanguageResp> {
    Json(LanguageResp {
        language,
        instruction: build_output_language_instruction(language).to_string(),
    })
}

/// Build the output language instruction, optionally appended to a prompt
/// POST /api/language/instruction
#[utoipa::path(
    post,
    path = "/api/language/instruction",
    request_body = InstructionReq,
    responses(
        (status = 200, description = "Instruction for the selected language", body = InstructionResp),
        (status = 400, description = "Unsupported language tag or malformed body")
    ),
    tag = "Language"
)]
pub async fn build_instruction(
    RequestLanguage(request_language): RequestLanguage,
    body: Result<Json<InstructionReq>, JsonRejection>,
) -> Result<Json<InstructionResp>, LocalizedApiError> {
    let Json(req) = body.map_err(|rejection| {
        ApiError::validation_error(rejection.body_text()).localized(request_language)
    })?;

    let language = match req.language.as_deref() {
        Some(tag) => tag
            .parse::<OutputLanguage>()
            .map_err(|e| e.localized(request_language))?,
        None => request_language,
    };

    tracing::debug!("Building instruction for language {}", language);

    Ok(Json(instruction_response(language, req.prompt.as_deref())))
}

/// Shared by the HTTP handler and the `instruction` CLI command
pub fn instruction_response(language: OutputLanguage, prompt: Option<&str>) -> InstructionResp {
    InstructionResp {
        language,
        instruction: build_output_language_instruction(language).to_string(),
        prompt: prompt.map(|p| append_output_language_instruction(p, language)),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: String,
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = HealthResp)),
    tag = "System"
)]
pub async fn health() -> Json<HealthResp> {
    Json(HealthResp { status: "ok".to_string() })
}
