pub mod health;
pub mod languages;
pub mod translate;
pub mod tts;

use crate::domain::job::PersistOutcome;
use crate::error::AppError;

/// Reject blank text and text longer than `max_chars` characters
pub(crate) fn validate_text(text: &str, max_chars: usize) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::BadRequest("Text cannot be empty".to_string()));
    }

    let char_count = text.chars().count();
    if char_count > max_chars {
        return Err(AppError::PayloadTooLarge(format!(
            "Text must be {} characters or less, got {}",
            max_chars, char_count
        )));
    }

    Ok(())
}

pub(crate) fn log_persist_outcome(outcome: &PersistOutcome, request_id: &str) {
    match outcome {
        PersistOutcome::Stored(job_id) => {
            tracing::debug!(request_id = %request_id, job_id = %job_id, "Job stored");
        }
        PersistOutcome::Failed(reason) => {
            tracing::warn!(request_id = %request_id, reason = %reason, "Failed to store job, continuing");
        }
        PersistOutcome::Disabled => {
            tracing::debug!(request_id = %request_id, "Document store disabled, job not stored");
        }
    }
}
