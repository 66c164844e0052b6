use axum::{extract::State, Extension, Json};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

use super::{log_persist_outcome, validate_text};
use crate::{
    domain::{
        job::{Job, JobRecorder, JobStatus, SourceType},
        shared::{LanguageCode, AUTO_DETECT},
        translation::{TranslationService, TranslationServiceApi},
    },
    error::{AppError, AppResult},
    infrastructure::{config::FailurePolicy, middleware::RequestId},
};

pub const MAX_TRANSLATE_CHARS: usize = 5000;

/// Request for POST /translate
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
    #[serde(default)]
    pub source_language: Option<String>,
}

/// Response for POST /translate
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated: String,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

fn language_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[a-z]{2,3}(-[a-z0-9]{2,8})?$").expect("language tag pattern is valid")
    })
}

/// Returns the normalized source code, `None` meaning auto-detect
fn parse_source_language(source: Option<&str>) -> AppResult<Option<String>> {
    let Some(source) = source.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if source.eq_ignore_ascii_case(AUTO_DETECT) {
        return Ok(None);
    }

    if !language_tag_pattern().is_match(source) {
        return Err(AppError::BadRequest(format!(
            "Invalid source language: {}",
            source
        )));
    }

    Ok(Some(source.to_lowercase()))
}

pub struct TranslateController {
    translation_service: Arc<TranslationService>,
    recorder: JobRecorder,
    failure_policy: FailurePolicy,
}

impl TranslateController {
    pub fn new(
        translation_service: Arc<TranslationService>,
        recorder: JobRecorder,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            translation_service,
            recorder,
            failure_policy,
        }
    }

    /// POST /translate - Translate text into a supported Indian language
    pub async fn translate(
        State(controller): State<Arc<TranslateController>>,
        Extension(request_id): Extension<RequestId>,
        Json(request): Json<TranslateRequest>,
    ) -> AppResult<Json<TranslateResponse>> {
        let target = LanguageCode::from_code(&request.target_language).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unsupported target language: {}",
                request.target_language.trim()
            ))
        })?;
        validate_text(&request.text, MAX_TRANSLATE_CHARS)?;
        let source = parse_source_language(request.source_language.as_deref())?;

        let outcome = controller
            .translation_service
            .translate(&request.text, target, source.as_deref())
            .await;

        if outcome.is_degraded() && controller.failure_policy == FailurePolicy::Strict {
            return Err(AppError::ExternalService(
                "Translation service failed".to_string(),
            ));
        }

        let mut job = Job::new(SourceType::Text, target)
            .with_source(
                request.text.as_str(),
                Some(source.unwrap_or_else(|| AUTO_DETECT.to_string())),
            )
            .with_translation(outcome.translated.as_str())
            .with_meta("request_id", request_id.0.as_str());

        job = match &outcome.provider {
            Some(provider) => job
                .with_status(JobStatus::Translated)
                .with_meta("provider", provider.as_str()),
            None => job
                .with_status(JobStatus::Failed)
                .with_meta("degraded", true)
                .with_meta("notes", outcome.notes.clone()),
        };
        if let Some(detected) = &outcome.detected_language {
            job = job.with_meta("detected_language", detected.as_str());
        }

        let persisted = controller.recorder.record(&job).await;
        log_persist_outcome(&persisted, &request_id.0);

        Ok(Json(TranslateResponse {
            translated: outcome.translated,
            notes: outcome.notes,
            job_id: persisted.job_id().map(str::to_string),
        }))
    }
}
