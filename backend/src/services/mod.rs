pub mod language;

pub use language::{
    LanguagePreference, append_output_language_instruction, build_output_language_instruction,
    parse_output_language, resolve_output_language,
};
