//! Output language selection for text-generation prompts.
//!
//! Resolves which language (English or Simplified Chinese) generated text
//! should use from a request's `Accept-Language` header or stored choice,
//! and turns that choice into an instruction sentence for the model.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

rust_i18n::i18n!("locales", fallback = "en");

pub use config::Config;
pub use models::OutputLanguage;
pub use services::language::{
    LanguagePreference, append_output_language_instruction, build_output_language_instruction,
    parse_output_language, resolve_output_language,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config: Arc::new(config) }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::language::get_language,
        handlers::language::build_instruction,
        handlers::language::health,
    ),
    components(schemas(
        models::OutputLanguage,
        models::LanguageResp,
        models::InstructionReq,
        models::InstructionResp,
        handlers::language::HealthResp,
    )),
    tags(
        (name = "Language", description = "Output language resolution"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router with all middleware applied
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .route("/api/health", get(handlers::language::health))
        .route("/api/language", get(handlers::language::get_language))
        .route("/api/language/instruction", post(handlers::language::build_instruction))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(from_fn_with_state(state.clone(), middleware::locale_middleware))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
