pub mod language;

pub use language::{InstructionReq, InstructionResp, LanguageResp, OutputLanguage};
