use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::job::JobRecorder;
use crate::infrastructure::config::{Config, TtsMode};

pub const ROOT_MESSAGE: &str = "Indian Regional Language Dubber API is running";

/// Error text kept in diagnostics
const MAX_ERROR_LEN: usize = 50;

/// GET / - Liveness message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

/// Response for GET /test
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
    pub translation_providers: Vec<&'static str>,
    pub tts_mode: &'static str,
}

pub struct HealthController {
    recorder: JobRecorder,
    config: Arc<Config>,
    translation_providers: Vec<&'static str>,
}

impl HealthController {
    pub fn new(recorder: JobRecorder, config: Arc<Config>, translation_providers: Vec<&'static str>) -> Self {
        Self {
            recorder,
            config,
            translation_providers,
        }
    }

    /// GET /test - Report backend and document store status
    pub async fn diagnostics(State(controller): State<Arc<HealthController>>) -> Json<DiagnosticsResponse> {
        let config = &controller.config;

        let mut response = DiagnosticsResponse {
            backend: "running".to_string(),
            database: "not configured".to_string(),
            database_url: set_or_not(config.database_url.is_some()),
            database_name: set_or_not(config.database_name.is_some()),
            connection_status: "not connected".to_string(),
            collections: Vec::new(),
            translation_providers: controller.translation_providers.clone(),
            tts_mode: match config.tts_mode {
                TtsMode::Engine => "engine",
                TtsMode::Demo => "demo",
            },
        };

        if let Some(store) = controller.recorder.store() {
            match store.status().await {
                Ok(status) => {
                    response.database = "connected".to_string();
                    response.connection_status = "connected".to_string();
                    response.database_name = status.database_name;
                    response.collections = status.collections;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Document store status check failed");
                    let mut message = e.to_string();
                    if let Some((idx, _)) = message.char_indices().nth(MAX_ERROR_LEN) {
                        message.truncate(idx);
                    }
                    response.database = format!("error: {}", message);
                }
            }
        }

        Json(response)
    }
}

fn set_or_not(is_set: bool) -> String {
    let status = if is_set { "set" } else { "not set" };
    status.to_string()
}
