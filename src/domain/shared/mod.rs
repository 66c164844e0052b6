pub mod language;

pub use language::{supported_languages, LanguageCode, SourceLanguageDetector, AUTO_DETECT};
