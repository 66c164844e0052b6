use super::error::TtsServiceError;
use super::AudioFormat;
use crate::domain::shared::LanguageCode;
use crate::infrastructure::repositories::{TtsEngineError, TtsRepository};
use crate::infrastructure::storage::AudioStore;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// URL prefix the output directory is served under
pub const OUTPUT_URL_PREFIX: &str = "/outputs";

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    pub filename: String,
    pub audio_url: String,
    pub audio_format: AudioFormat,
    pub size_bytes: usize,
    pub engine: String,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    audio_store: Arc<AudioStore>,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, audio_store: Arc<AudioStore>) -> Self {
        Self {
            tts_repo,
            audio_store,
        }
    }
}

/// `tts_<32 hex chars>.<ext>`, unique per call regardless of input
pub fn generate_filename(format: AudioFormat) -> String {
    format!("tts_{}.{}", Uuid::new_v4().simple(), format.extension())
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text to speech and store it in the output directory
    ///
    /// This operation:
    /// - Calls the speech engine for the given language
    /// - Writes the audio under a freshly generated file name
    ///
    /// Returns the file name and the URL it is served at
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
        voice: Option<&str>,
    ) -> Result<TtsSynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
        voice: Option<&str>,
    ) -> Result<TtsSynthesisResult, TtsServiceError> {
        let audio_format = self.tts_repo.audio_format();
        let filename = generate_filename(audio_format);

        tracing::info!(
            engine = %self.tts_repo.name(),
            language = %language,
            voice = ?voice,
            text_length = text.len(),
            filename = %filename,
            "TTS synthesis request"
        );

        let audio_data = self
            .tts_repo
            .synthesize(text, language, voice)
            .await
            .map_err(|e| match e {
                TtsEngineError::Unavailable(msg) => TtsServiceError::EngineUnavailable(msg),
                TtsEngineError::Failed(reason) => TtsServiceError::SynthesisFailed { language, reason },
            })?;

        self.audio_store
            .write(&filename, &audio_data)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    filename = %filename,
                    dir = %self.audio_store.dir().display(),
                    "Failed to write synthesized audio"
                );
                TtsServiceError::SynthesisFailed {
                    language,
                    reason: format!("could not store audio: {}", e),
                }
            })?;

        Ok(TtsSynthesisResult {
            audio_url: format!("{}/{}", OUTPUT_URL_PREFIX, filename),
            filename,
            audio_format,
            size_bytes: audio_data.len(),
            engine: self.tts_repo.name().to_string(),
        })
    }
}
