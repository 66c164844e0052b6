use axum::{extract::State, Extension, Json};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

use super::{log_persist_outcome, validate_text};
use crate::{
    domain::{
        job::{Job, JobRecorder, JobStatus, SourceType},
        shared::LanguageCode,
        tts::{TtsService, TtsServiceApi},
    },
    error::{AppError, AppResult},
    infrastructure::{config::TtsMode, middleware::RequestId},
};

pub const MAX_TTS_CHARS: usize = 10000;

pub const DEMO_MESSAGE: &str =
    "TTS demo endpoint - integrate with a real TTS provider for audio output.";

/// Request for POST /tts
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    pub language: String,
    #[serde(default)]
    pub voice: Option<String>,
}

/// Response for POST /tts
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TtsResponse {
    Audio {
        audio_url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        job_id: Option<String>,
    },
    Demo {
        message: &'static str,
        language: LanguageCode,
    },
}

fn voice_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.+\-]{1,64}$").expect("voice pattern is valid"))
}

/// Voices end up on the engine command line, so only plain names pass
fn parse_voice(voice: Option<&str>) -> AppResult<Option<&str>> {
    match voice.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(voice) if voice_pattern().is_match(voice) => Ok(Some(voice)),
        Some(voice) => Err(AppError::BadRequest(format!("Invalid voice: {}", voice))),
    }
}

pub struct TtsController {
    tts_service: Arc<TtsService>,
    recorder: JobRecorder,
    mode: TtsMode,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>, recorder: JobRecorder, mode: TtsMode) -> Self {
        Self {
            tts_service,
            recorder,
            mode,
        }
    }

    /// POST /tts - Convert text to speech and return the audio URL
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Extension(request_id): Extension<RequestId>,
        Json(request): Json<TtsRequest>,
    ) -> AppResult<Json<TtsResponse>> {
        let language = LanguageCode::from_code(&request.language).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unsupported language for TTS: {}",
                request.language.trim()
            ))
        })?;
        validate_text(&request.text, MAX_TTS_CHARS)?;
        let voice = parse_voice(request.voice.as_deref())?;

        if controller.mode == TtsMode::Demo {
            return Ok(Json(TtsResponse::Demo {
                message: DEMO_MESSAGE,
                language,
            }));
        }

        let result = controller
            .tts_service
            .synthesize(&request.text, language, voice)
            .await?;

        let mut job = Job::new(SourceType::Text, language)
            .with_source(request.text.as_str(), None)
            .with_audio_filename(result.filename.as_str())
            .with_status(JobStatus::TtsGenerated)
            .with_meta("provider", result.engine.as_str())
            .with_meta("audio_format", result.audio_format.extension())
            .with_meta("audio_bytes", result.size_bytes)
            .with_meta("request_id", request_id.0.as_str());
        if let Some(voice) = voice {
            job = job.with_meta("voice", voice);
        }

        let persisted = controller.recorder.record(&job).await;
        log_persist_outcome(&persisted, &request_id.0);

        Ok(Json(TtsResponse::Audio {
            audio_url: result.audio_url,
            job_id: persisted.job_id().map(str::to_string),
        }))
    }
}
