use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel used by callers to request automatic source language detection
pub const AUTO_DETECT: &str = "auto";

/// ISO 639-1 codes of the regional languages we translate into and synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "ml")]
    Malayalam,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "gu")]
    Gujarati,
    #[serde(rename = "kn")]
    Kannada,
    #[serde(rename = "pa")]
    Punjabi,
    #[serde(rename = "or")]
    Odia,
    #[serde(rename = "as")]
    Assamese,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 11] = [
        LanguageCode::Hindi,
        LanguageCode::Bengali,
        LanguageCode::Tamil,
        LanguageCode::Telugu,
        LanguageCode::Malayalam,
        LanguageCode::Marathi,
        LanguageCode::Gujarati,
        LanguageCode::Kannada,
        LanguageCode::Punjabi,
        LanguageCode::Odia,
        LanguageCode::Assamese,
    ];

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Hindi => "hi",
            LanguageCode::Bengali => "bn",
            LanguageCode::Tamil => "ta",
            LanguageCode::Telugu => "te",
            LanguageCode::Malayalam => "ml",
            LanguageCode::Marathi => "mr",
            LanguageCode::Gujarati => "gu",
            LanguageCode::Kannada => "kn",
            LanguageCode::Punjabi => "pa",
            LanguageCode::Odia => "or",
            LanguageCode::Assamese => "as",
        }
    }

    /// English display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::Hindi => "Hindi",
            LanguageCode::Bengali => "Bengali",
            LanguageCode::Tamil => "Tamil",
            LanguageCode::Telugu => "Telugu",
            LanguageCode::Malayalam => "Malayalam",
            LanguageCode::Marathi => "Marathi",
            LanguageCode::Gujarati => "Gujarati",
            LanguageCode::Kannada => "Kannada",
            LanguageCode::Punjabi => "Punjabi",
            LanguageCode::Odia => "Odia",
            LanguageCode::Assamese => "Assamese",
        }
    }

    /// Look up a supported language by its exact code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|language| language.as_str() == code)
    }

    /// Language to suggest when synthesis for this one fails: Hindi, or
    /// Bengali when Hindi itself failed
    pub fn suggested_alternative(&self) -> LanguageCode {
        match self {
            LanguageCode::Hindi => LanguageCode::Bengali,
            _ => LanguageCode::Hindi,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Code to display name mapping served by GET /supported-languages
pub fn supported_languages() -> BTreeMap<&'static str, &'static str> {
    LanguageCode::ALL
        .into_iter()
        .map(|language| (language.as_str(), language.display_name()))
        .collect()
}

/// Best-effort detector for the source side of a translation request.
///
/// Only knows the languages compiled into lingua (see Cargo.toml), so the
/// result is advisory and ends up in job metadata, never in routing.
pub struct SourceLanguageDetector {
    detector: LanguageDetector,
}

impl SourceLanguageDetector {
    pub fn new() -> Self {
        let languages = [
            Language::English,
            Language::Hindi,
            Language::Bengali,
            Language::Tamil,
            Language::Telugu,
            Language::Marathi,
            Language::Gujarati,
            Language::Punjabi,
        ];

        Self {
            detector: LanguageDetectorBuilder::from_languages(&languages).build(),
        }
    }

    /// Returns the ISO 639-1 code of the detected language, if any
    pub fn detect(&self, text: &str) -> Option<String> {
        self.detector
            .detect_language_of(text)
            .map(|language| language.iso_code_639_1().to_string())
    }
}

impl Default for SourceLanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}
