pub mod error;
pub mod i18n;

pub use error::{ApiError, LocalizedApiError};
pub use i18n::{accept_language, extract_cookie, extract_preference};
