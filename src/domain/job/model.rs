use crate::domain::shared::LanguageCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Text,
    Audio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Translated,
    TtsGenerated,
    Failed,
}

/// Audit record of one translation or synthesis request.
///
/// Built once per completed request and stored as-is; jobs are never
/// updated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub source_type: SourceType,
    pub source_text: Option<String>,
    pub source_language: Option<String>,
    pub target_language: LanguageCode,
    pub translation: Option<String>,
    pub audio_filename: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl Job {
    pub const COLLECTION: &'static str = "job";

    pub fn new(source_type: SourceType, target_language: LanguageCode) -> Self {
        Self {
            source_type,
            source_text: None,
            source_language: None,
            target_language,
            translation: None,
            audio_filename: None,
            status: JobStatus::Pending,
            meta: Map::new(),
        }
    }

    pub fn with_source(mut self, text: impl Into<String>, language: Option<String>) -> Self {
        self.source_text = Some(text.into());
        self.source_language = language;
        self
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    pub fn with_audio_filename(mut self, filename: impl Into<String>) -> Self {
        self.audio_filename = Some(filename.into());
        self
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.meta.insert(key.to_string(), value.into());
        self
    }
}
