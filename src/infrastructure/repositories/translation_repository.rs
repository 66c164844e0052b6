use crate::domain::shared::LanguageCode;
use async_trait::async_trait;

/// Repository for machine translation.
/// Abstracts one external translation backend (LibreTranslate, MyMemory, ...).
///
/// Implementations only translate; retries, timeouts and fallback across
/// backends belong to the translation service.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Short backend name used in logs and diagnostic notes
    fn name(&self) -> &'static str;

    /// Translate `text` from `source` (an ISO code or "auto") into `target`
    ///
    /// Returns `Ok(None)` when the backend answered without a translation.
    ///
    /// # Errors
    /// Returns error if the backend is unreachable or rejects the request
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: LanguageCode,
    ) -> Result<Option<String>, String>;
}
