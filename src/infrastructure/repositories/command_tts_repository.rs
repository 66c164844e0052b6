use super::tts_repository::{TtsEngineError, TtsRepository};
use crate::domain::shared::LanguageCode;
use crate::domain::tts::AudioFormat;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const MAX_STDERR_IN_ERROR: usize = 200;

/// Local command-line speech engine.
///
/// The text is written to the child's stdin and the audio is read from its
/// stdout. Arguments may contain `{lang}` and `{voice}` placeholders, e.g.
/// `gtts-cli --lang {lang} -` or `espeak-ng -v {voice} --stdin --stdout`.
pub struct CommandTtsRepository {
    program: String,
    args: Vec<String>,
    audio_format: AudioFormat,
    timeout: Duration,
}

impl CommandTtsRepository {
    pub fn new(command_line: &str, audio_format: AudioFormat, timeout: Duration) -> Result<Self, String> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| "TTS command must not be empty".to_string())?;

        Ok(Self {
            program,
            args: parts.collect(),
            audio_format,
            timeout,
        })
    }

    /// Substitute placeholders. The voice defaults to the language code.
    fn render_args(&self, language: LanguageCode, voice: Option<&str>) -> Vec<String> {
        let voice = voice.unwrap_or(language.as_str());
        self.args
            .iter()
            .map(|arg| arg.replace("{lang}", language.as_str()).replace("{voice}", voice))
            .collect()
    }
}

#[async_trait]
impl TtsRepository for CommandTtsRepository {
    fn name(&self) -> &str {
        &self.program
    }

    fn audio_format(&self) -> AudioFormat {
        self.audio_format
    }

    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
        voice: Option<&str>,
    ) -> Result<Vec<u8>, TtsEngineError> {
        let args = self.render_args(language, voice);
        let start_time = std::time::Instant::now();

        tracing::info!(
            program = %self.program,
            args = ?args,
            language = %language,
            text_length = text.len(),
            "Starting speech engine"
        );

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    TtsEngineError::Unavailable(format!("{}: {}", self.program, e))
                }
                _ => TtsEngineError::Failed(format!("could not start {}: {}", self.program, e)),
            })?;

        // Feed stdin concurrently so a chatty engine cannot fill its stdout
        // pipe while we are still writing.
        if let Some(mut stdin) = child.stdin.take() {
            let input = text.as_bytes().to_vec();
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(&input).await {
                    tracing::debug!(error = %e, "Speech engine closed stdin early");
                }
                // stdin is dropped here, closing the pipe
            });
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::error!(
                    program = %self.program,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Speech engine timed out"
                );
                TtsEngineError::Failed(format!("engine timed out after {:?}", self.timeout))
            })?
            .map_err(|e| TtsEngineError::Failed(format!("engine I/O error: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr: String = stderr.trim().chars().take(MAX_STDERR_IN_ERROR).collect();
            tracing::error!(
                program = %self.program,
                status = %output.status,
                stderr = %stderr,
                "Speech engine failed"
            );
            return Err(TtsEngineError::Failed(if stderr.is_empty() {
                format!("engine exited with {}", output.status)
            } else {
                format!("engine exited with {}: {}", output.status, stderr)
            }));
        }

        if output.stdout.is_empty() {
            return Err(TtsEngineError::Failed("engine produced no audio".to_string()));
        }

        tracing::info!(
            provider = %self.program,
            language = %language,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = output.stdout.len(),
            "TTS synthesis completed"
        );

        Ok(output.stdout)
    }
}
