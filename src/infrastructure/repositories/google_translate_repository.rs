use super::translation_repository::TranslationRepository;
use crate::domain::shared::LanguageCode;
use async_trait::async_trait;
use serde_json::Value;

/// Google Translate (public gtx endpoint) implementation of the translation repository
pub struct GoogleTranslateRepository {
    client: reqwest::Client,
    url: String,
}

impl GoogleTranslateRepository {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

/// The gtx endpoint answers with nested arrays:
/// `[[["<translated>", "<original>", ...], ...], null, "<detected source>", ...]`.
/// Long inputs are split into several segments which must be joined back.
fn parse_response(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    Some(translated)
}

#[async_trait]
impl TranslationRepository for GoogleTranslateRepository {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: LanguageCode,
    ) -> Result<Option<String>, String> {
        tracing::debug!(
            url = %self.url,
            source = source,
            target = %target,
            text_length = text.len(),
            "Calling Google Translate"
        );

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?
            .error_for_status()
            .map_err(|e| format!("HTTP error: {}", e))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("unreadable response: {}", e))?;

        Ok(parse_response(&body))
    }
}
