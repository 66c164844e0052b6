use super::translation_repository::TranslationRepository;
use crate::domain::shared::{LanguageCode, AUTO_DETECT};
use async_trait::async_trait;
use serde_json::Value;

/// MyMemory implementation of the translation repository
pub struct MyMemoryRepository {
    client: reqwest::Client,
    url: String,
}

impl MyMemoryRepository {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

/// MyMemory spells the detection sentinel differently
fn source_param(source: &str) -> &str {
    if source == AUTO_DETECT {
        "autodetect"
    } else {
        source
    }
}

/// Extract the translation from a MyMemory response body.
/// `responseStatus` comes back as either a number or a string.
fn parse_response(body: &Value) -> Result<Option<String>, String> {
    let status = match body.get("responseStatus") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };

    if status != Some(200) {
        let details = body
            .get("responseDetails")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
            .unwrap_or("no error detail");
        return Err(format!(
            "status {}: {}",
            status.map(|s| s.to_string()).unwrap_or_else(|| "unknown".to_string()),
            details
        ));
    }

    Ok(body
        .get("responseData")
        .and_then(|data| data.get("translatedText"))
        .and_then(Value::as_str)
        .map(str::to_string))
}

#[async_trait]
impl TranslationRepository for MyMemoryRepository {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: LanguageCode,
    ) -> Result<Option<String>, String> {
        let langpair = format!("{}|{}", source_param(source), target.as_str());

        tracing::debug!(
            url = %self.url,
            langpair = %langpair,
            text_length = text.len(),
            "Calling MyMemory"
        );

        let response = self
            .client
            .get(&self.url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?
            .error_for_status()
            .map_err(|e| format!("HTTP error: {}", e))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("unreadable response: {}", e))?;

        parse_response(&body)
    }
}
