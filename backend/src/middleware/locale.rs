//! Locale extraction middleware
//!
//! Resolves the output language from the stored language cookie and the
//! Accept-Language header, and stores it in the request extensions so
//! handlers can pick it up with the `RequestLanguage` extractor.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::models::OutputLanguage;
use crate::services::language::{parse_output_language, resolve_output_language};
use crate::utils::{accept_language, extract_preference};

/// Middleware to resolve the request's output language
pub async fn locale_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let preference = extract_preference(req.headers(), state.config.language.active_cookie());
    let language = resolve_output_language(preference);

    tracing::debug!(
        language = %language,
        accept_language = ?preference.accept_language,
        cookie = ?preference.cookie,
        "Resolved request language"
    );

    req.extensions_mut().insert(language);

    next.run(req).await
}

/// Output language of the current request.
///
/// Set by `locale_middleware`; without it, falls back to parsing Accept-Language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLanguage(pub OutputLanguage);

#[async_trait]
impl<S> FromRequestParts<S> for RequestLanguage
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let language = parts
            .extensions
            .get::<OutputLanguage>()
            .copied()
            .unwrap_or_else(|| parse_output_language(accept_language(&parts.headers)));

        Ok(RequestLanguage(language))
    }
}
