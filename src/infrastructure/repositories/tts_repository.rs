use crate::domain::shared::LanguageCode;
use crate::domain::tts::AudioFormat;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum TtsEngineError {
    /// The engine cannot run at all (binary missing, not executable)
    #[error("speech engine unavailable: {0}")]
    Unavailable(String),
    /// The engine ran but did not produce audio
    #[error("{0}")]
    Failed(String),
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying speech engine (gTTS CLI, espeak-ng, piper, ...)
///
/// Implementations are responsible for:
/// - Mapping the language (and optional voice) to engine arguments
/// - Bounding the engine's run time
/// - Returning the complete audio stream in `audio_format()`
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Engine name for logs and job metadata
    fn name(&self) -> &str;

    /// Format of the bytes returned by `synthesize`
    fn audio_format(&self) -> AudioFormat;

    /// Synthesize text to speech for a given language
    ///
    /// # Arguments
    /// * `text` - The text to speak, already in the target language
    /// * `language` - The language to synthesize
    /// * `voice` - Optional engine-specific voice name
    ///
    /// # Errors
    /// Returns `Unavailable` if the engine cannot be started, `Failed` otherwise
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
        voice: Option<&str>,
    ) -> Result<Vec<u8>, TtsEngineError>;
}
