//! Output language model
//!
//! The closed set of languages that generated text may be requested in,
//! plus the request/response payloads of the language API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::utils::ApiError;

/// Language used for all generated output.
///
/// Serialized as the exact tags `"en"` and `"zh-CN"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum OutputLanguage {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-CN")]
    SimplifiedChinese,
}

impl OutputLanguage {
    pub const ALL: [OutputLanguage; 2] = [Self::English, Self::SimplifiedChinese];

    /// Canonical language tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::SimplifiedChinese => "zh-CN",
        }
    }
}

impl fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse of a stored or explicitly chosen tag.
///
/// After trimming surrounding whitespace, only the exact, case-sensitive
/// tags `en` and `zh-CN` are accepted. Header values go through
/// `services::language::parse_output_language` instead.
impl FromStr for OutputLanguage {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == tag)
            .ok_or_else(|| ApiError::invalid_language(tag))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LanguageResp {
    pub language: OutputLanguage,
    pub instruction: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InstructionReq {
    /// Explicit language tag; overrides the request's resolved language
    #[serde(default)]
    pub language: Option<String>,
    /// Prompt to append the instruction to
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InstructionResp {
    pub language: OutputLanguage,
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_exact_tags() {
        assert_eq!("en".parse::<OutputLanguage>().unwrap(), OutputLanguage::English);
        assert_eq!("zh-CN".parse::<OutputLanguage>().unwrap(), OutputLanguage::SimplifiedChinese);
        // Surrounding whitespace is ignored
        assert_eq!(" en".parse::<OutputLanguage>().unwrap(), OutputLanguage::English);
        assert_eq!("zh-CN\n".parse::<OutputLanguage>().unwrap(), OutputLanguage::SimplifiedChinese);
    }

    #[test]
    fn test_from_str_rejects_other_tags() {
        for raw in ["", "zh", "zh-TW", "en-US", "fr", "ZH-cn", "EN", "zh-cn"] {
            let err = raw.parse::<OutputLanguage>().unwrap_err();
            assert!(matches!(err, ApiError::InvalidLanguage(_)), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_serde_uses_tags() {
        let json = serde_json::to_string(&OutputLanguage::SimplifiedChinese).unwrap();
        assert_eq!(json, "\"zh-CN\"");

        let lang: OutputLanguage = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, OutputLanguage::English);
        assert_eq!(OutputLanguage::default(), OutputLanguage::English);
    }
}
