use crate::domain::shared::{LanguageCode, SourceLanguageDetector, AUTO_DETECT};
use crate::infrastructure::repositories::TranslationRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Diagnostic notes returned to the caller; further failures are only logged
pub const MAX_NOTES: usize = 2;

const CACHE_CAPACITY: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    pub translated: String,
    /// Provider that produced `translated`, `None` when the input was echoed
    pub provider: Option<String>,
    pub notes: Vec<String>,
    /// Local guess of the source language, only computed for "auto" requests
    pub detected_language: Option<String>,
}

impl TranslationOutcome {
    pub fn is_degraded(&self) -> bool {
        self.provider.is_none()
    }
}

pub struct TranslationService {
    providers: Vec<Arc<dyn TranslationRepository>>,
    timeout: Duration,
    language_detector: SourceLanguageDetector,
    cache: Option<Cache<String, (String, String)>>,
}

impl TranslationService {
    pub fn new(
        providers: Vec<Arc<dyn TranslationRepository>>,
        timeout: Duration,
        cache_enabled: bool,
    ) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(CACHE_CAPACITY)
                    .time_to_idle(Duration::from_secs(30 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self {
            providers,
            timeout,
            language_detector: SourceLanguageDetector::new(),
            cache,
        }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }
}

/// Normalize the optional source code; blank and "auto" both mean detect
fn normalize_source(source: Option<&str>) -> String {
    match source.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_lowercase(),
        _ => AUTO_DETECT.to_string(),
    }
}

fn cache_key(text: &str, source: &str, target: LanguageCode) -> String {
    format!("{}\u{1f}{}\u{1f}{}", source, target, text)
}

#[async_trait]
pub trait TranslationServiceApi: Send + Sync {
    /// Translate text through the provider chain
    ///
    /// Providers are tried in order, each bounded by the configured timeout.
    /// The first non-blank translation wins. When every provider fails the
    /// input is returned unchanged, so this never fails.
    async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
        source: Option<&str>,
    ) -> TranslationOutcome;
}

#[async_trait]
impl TranslationServiceApi for TranslationService {
    async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
        source: Option<&str>,
    ) -> TranslationOutcome {
        let source = normalize_source(source);
        let detected_language = if source == AUTO_DETECT {
            self.language_detector.detect(text)
        } else {
            None
        };

        tracing::info!(
            source = %source,
            target = %target,
            detected_language = ?detected_language,
            text_length = text.len(),
            "Translation request"
        );

        let key = cache_key(text, &source, target);
        if let Some(cache) = &self.cache {
            if let Some((translated, provider)) = cache.get(&key).await {
                tracing::info!(provider = %provider, "Translation cache hit");
                return TranslationOutcome {
                    translated,
                    provider: Some(provider),
                    notes: Vec::new(),
                    detected_language,
                };
            }
        }

        let mut notes = Vec::new();

        for provider in &self.providers {
            let name = provider.name();
            let start_time = std::time::Instant::now();

            let reason = match tokio::time::timeout(
                self.timeout,
                provider.translate(text, &source, target),
            )
            .await
            {
                Ok(Ok(Some(translated))) if !translated.trim().is_empty() => {
                    tracing::info!(
                        provider = name,
                        latency_ms = start_time.elapsed().as_millis(),
                        translated_length = translated.len(),
                        "Translation succeeded"
                    );

                    if let Some(cache) = &self.cache {
                        cache
                            .insert(key, (translated.clone(), name.to_string()))
                            .await;
                    }

                    return TranslationOutcome {
                        translated,
                        provider: Some(name.to_string()),
                        notes,
                        detected_language,
                    };
                }
                Ok(Ok(_)) => "empty translation".to_string(),
                Ok(Err(e)) => e,
                Err(_) => format!("timed out after {:?}", self.timeout),
            };

            tracing::warn!(
                provider = name,
                reason = %reason,
                latency_ms = start_time.elapsed().as_millis(),
                "Translation provider failed, trying next"
            );

            if notes.len() < MAX_NOTES {
                notes.push(format!("{}: {}", name, reason));
            }
        }

        tracing::warn!(
            providers = self.providers.len(),
            target = %target,
            "All translation providers failed, echoing input"
        );

        TranslationOutcome {
            translated: text.to_string(),
            provider: None,
            notes,
            detected_language,
        }
    }
}
