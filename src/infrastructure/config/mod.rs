use crate::domain::tts::AudioFormat;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_LIBRETRANSLATE_URL: &str = "https://libretranslate.com/translate";
pub const DEFAULT_MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_TTS_COMMAND: &str = "gtts-cli --lang {lang} -";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Document store
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    // Translation
    pub libretranslate_url: String,
    pub libretranslate_api_key: Option<String>,
    pub mymemory_url: String,
    pub google_translate_url: String,
    pub translation_providers: Vec<ProviderKind>,
    pub translation_timeout_secs: u64,
    pub translation_failure_policy: FailurePolicy,
    pub translation_cache_enabled: bool,
    // Speech synthesis
    pub tts_mode: TtsMode,
    pub tts_command: String,
    pub tts_audio_format: AudioFormat,
    pub tts_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub audio_retention_hours: Option<u64>,
    pub audio_sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    LibreTranslate,
    MyMemory,
    Google,
}

impl ProviderKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "libretranslate" => Some(ProviderKind::LibreTranslate),
            "mymemory" => Some(ProviderKind::MyMemory),
            "google" => Some(ProviderKind::Google),
            _ => None,
        }
    }
}

/// What /translate does when every provider failed
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Answer 200 with the input text echoed back
    Echo,
    /// Answer 502
    Strict,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TtsMode {
    Engine,
    Demo,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let translation_providers = match var("TRANSLATION_PROVIDERS") {
            Some(list) => list
                .split(',')
                .map(|name| {
                    ProviderKind::parse(name)
                        .ok_or_else(|| format!("unknown translation provider: {}", name.trim()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![
                ProviderKind::LibreTranslate,
                ProviderKind::MyMemory,
                ProviderKind::Google,
            ],
        };

        let config = Config {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()?,
            environment: match var("ENVIRONMENT").as_deref() {
                Some("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
            libretranslate_url: var("LIBRETRANSLATE_URL")
                .unwrap_or_else(|| DEFAULT_LIBRETRANSLATE_URL.to_string()),
            libretranslate_api_key: var("LIBRETRANSLATE_API_KEY"),
            mymemory_url: var("MYMEMORY_URL").unwrap_or_else(|| DEFAULT_MYMEMORY_URL.to_string()),
            google_translate_url: var("GOOGLE_TRANSLATE_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_TRANSLATE_URL.to_string()),
            translation_providers,
            translation_timeout_secs: var("TRANSLATION_TIMEOUT_SECS")
                .unwrap_or_else(|| "15".to_string())
                .parse()?,
            translation_failure_policy: match var("TRANSLATION_FAILURE_POLICY").as_deref() {
                Some("strict") => FailurePolicy::Strict,
                _ => FailurePolicy::Echo,
            },
            translation_cache_enabled: var("TRANSLATION_CACHE_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            tts_mode: match var("TTS_MODE").as_deref() {
                Some("demo") => TtsMode::Demo,
                _ => TtsMode::Engine,
            },
            tts_command: var("TTS_COMMAND").unwrap_or_else(|| DEFAULT_TTS_COMMAND.to_string()),
            tts_audio_format: match var("TTS_AUDIO_FORMAT").as_deref() {
                Some("wav") => AudioFormat::Wav,
                _ => AudioFormat::Mp3,
            },
            tts_timeout_secs: var("TTS_TIMEOUT_SECS")
                .unwrap_or_else(|| "60".to_string())
                .parse()?,
            output_dir: PathBuf::from(var("OUTPUT_DIR").unwrap_or_else(|| "outputs".to_string())),
            audio_retention_hours: var("AUDIO_RETENTION_HOURS")
                .map(|s| s.parse::<u64>())
                .transpose()?
                .filter(|hours| *hours > 0),
            audio_sweep_interval_secs: var("AUDIO_SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|| "600".to_string())
                .parse()?,
        };

        if config.audio_sweep_interval_secs == 0 {
            return Err("AUDIO_SWEEP_INTERVAL_SECS must be greater than zero".into());
        }
        if let Some(hours) = config.audio_retention_hours {
            if hours.checked_mul(3600).is_none() {
                return Err(format!("AUDIO_RETENTION_HOURS is too large: {}", hours).into());
            }
        }

        Ok(config)
    }
}
