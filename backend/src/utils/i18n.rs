//! Locale extraction from HTTP requests
//!
//! Pulls the raw language inputs (stored cookie, `Accept-Language`) out of
//! request headers. Interpreting them is left to `services::language`.

use axum::http::{
    HeaderMap,
    header::{ACCEPT_LANGUAGE, COOKIE},
};

use crate::services::language::LanguagePreference;

/// Cookie the frontend stores the chosen language in
pub const DEFAULT_LANGUAGE_COOKIE: &str = "language";

/// Find a cookie value in a `Cookie` header value
pub fn extract_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
}

/// Extract Accept-Language header value
pub fn accept_language(headers: &HeaderMap) -> Option<&str> {
    headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok())
}

/// Collect the language preference carried by request headers.
///
/// `cookie_name` of `None` disables the stored-cookie lookup.
pub fn extract_preference<'a>(
    headers: &'a HeaderMap,
    cookie_name: Option<&str>,
) -> LanguagePreference<'a> {
    let cookie = cookie_name.and_then(|name| {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|header| extract_cookie(header, name))
    });

    LanguagePreference { explicit: None, cookie, accept_language: accept_language(headers) }
}
