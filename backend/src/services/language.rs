//! Language-aware helpers for text-generation prompts
//!
//! Decides which language generated text should use, based on the
//! `Accept-Language` header (or a stored/explicit choice), and produces the
//! sentence that steers the model towards it.
//!
//! Only the first comma-separated entry of `Accept-Language` is consulted and
//! quality values are ignored. Honouring `q=` weights would require scanning
//! the whole priority list instead.

use crate::models::OutputLanguage;

const ENGLISH_INSTRUCTION: &str = "Use English for all output.";
const SIMPLIFIED_CHINESE_INSTRUCTION: &str = "Use Simplified Chinese (zh-CN) for all output.";

/// Map an `Accept-Language`-style header value to an output language.
///
/// Absent or empty input, and anything whose first entry does not start
/// with `zh` (case-insensitive), falls back to English.
pub fn parse_output_language(accept_language: Option<&str>) -> OutputLanguage {
    let Some(value) = accept_language.filter(|v| !v.is_empty()) else {
        return OutputLanguage::English;
    };

    let first = value.split(',').next().unwrap_or_default().trim();
    let is_chinese = first
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("zh"));

    if is_chinese {
        OutputLanguage::SimplifiedChinese
    } else {
        OutputLanguage::English
    }
}

/// Instruction sentence for the given language.
///
/// The literals are consumed verbatim by prompt templates; do not reword.
pub fn build_output_language_instruction(output_language: OutputLanguage) -> &'static str {
    match output_language {
        OutputLanguage::English => ENGLISH_INSTRUCTION,
        OutputLanguage::SimplifiedChinese => SIMPLIFIED_CHINESE_INSTRUCTION,
    }
}

/// Append the instruction for `output_language` to a prompt, separated by a blank line.
pub fn append_output_language_instruction(prompt: &str, output_language: OutputLanguage) -> String {
    let instruction = build_output_language_instruction(output_language);
    let prompt = prompt.trim_end();
    if prompt.trim().is_empty() {
        instruction.to_string()
    } else {
        format!("{prompt}\n\n{instruction}")
    }
}

/// Everything known about a caller's language preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguagePreference<'a> {
    /// Choice made explicitly for this call
    pub explicit: Option<OutputLanguage>,
    /// Raw value of the stored language cookie
    pub cookie: Option<&'a str>,
    /// Raw `Accept-Language` header value
    pub accept_language: Option<&'a str>,
}

/// Resolve a preference: explicit choice, then a valid stored cookie,
/// then the `Accept-Language` header.
pub fn resolve_output_language(preference: LanguagePreference<'_>) -> OutputLanguage {
    if let Some(explicit) = preference.explicit {
        return explicit;
    }

    if let Some(raw) = preference.cookie {
        match parse_cookie_language(raw) {
            Some(lang) => return lang,
            None => tracing::debug!("Ignoring invalid language cookie value: {:?}", raw),
        }
    }

    parse_output_language(preference.accept_language)
}

/// Decode a cookie value and accept it only when it is exactly `en` or `zh-CN`.
fn parse_cookie_language(raw: &str) -> Option<OutputLanguage> {
    let decoded = urlencoding::decode(raw).ok()?;
    decoded.parse().ok()
}
