use super::translation_repository::TranslationRepository;
use crate::domain::shared::LanguageCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct LibreTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// LibreTranslate implementation of the translation repository
pub struct LibreTranslateRepository {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl LibreTranslateRepository {
    pub fn new(client: reqwest::Client, url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }
}

#[async_trait]
impl TranslationRepository for LibreTranslateRepository {
    fn name(&self) -> &'static str {
        "libretranslate"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: LanguageCode,
    ) -> Result<Option<String>, String> {
        let request = LibreTranslateRequest {
            q: text,
            source,
            target: target.as_str(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        tracing::debug!(
            url = %self.url,
            source = source,
            target = %target,
            text_length = text.len(),
            "Calling LibreTranslate"
        );

        let response = self
            .client
            .post(&self.url)
            .form(&request)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        let body: LibreTranslateResponse = response
            .json()
            .await
            .map_err(|e| format!("HTTP {}: unreadable response: {}", status.as_u16(), e))?;

        if !status.is_success() {
            return Err(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.error.unwrap_or_else(|| "no error detail".to_string())
            ));
        }

        Ok(body.translated_text)
    }
}
