use crate::domain::shared::LanguageCode;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("{0}")]
    EngineUnavailable(String),
    #[error(
        "{} ({language}) could not be synthesized: {reason}. Try another supported language such as '{}'",
        .language.display_name(),
        .language.suggested_alternative()
    )]
    SynthesisFailed {
        language: LanguageCode,
        reason: String,
    },
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::EngineUnavailable(msg) => AppError::EngineUnavailable(msg),
            err @ TtsServiceError::SynthesisFailed { .. } => AppError::SynthesisFailed(err.to_string()),
        }
    }
}
