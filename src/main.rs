use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use dubbing_backend::infrastructure::config::{Config, LogFormat, ProviderKind};
use dubbing_backend::infrastructure::db::create_pool;
use dubbing_backend::infrastructure::http::{build_app, start_http_server, AppDependencies};
use dubbing_backend::infrastructure::repositories::{
    CommandTtsRepository, DocumentRepository, GoogleTranslateRepository, LibreTranslateRepository,
    MyMemoryRepository, PgDocumentRepository, TranslationRepository,
};
use dubbing_backend::infrastructure::storage::{spawn_retention_task, AudioStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Dubbing Backend on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(environment = ?config.environment, "Configuration loaded");

    // Document store is optional; requests still succeed without it
    let document_repo: Option<Arc<dyn DocumentRepository>> = match &config.database_url {
        Some(url) => match create_pool(url, config.database_name.as_deref()) {
            Ok(pool) => {
                tracing::info!("Database connection pool created");
                Some(Arc::new(PgDocumentRepository::new(Arc::new(pool))) as Arc<dyn DocumentRepository>)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Invalid DATABASE_URL, job persistence disabled");
                None
            }
        },
        None => {
            tracing::warn!("DATABASE_URL not set, job persistence disabled");
            None
        }
    };

    // Shared HTTP client for translation providers
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.translation_timeout_secs))
        .build()?;

    tracing::info!(providers = ?config.translation_providers, "Instantiating translation providers...");
    let translation_repos: Vec<Arc<dyn TranslationRepository>> = config
        .translation_providers
        .iter()
        .map(|kind| -> Arc<dyn TranslationRepository> {
            match kind {
                ProviderKind::LibreTranslate => Arc::new(LibreTranslateRepository::new(
                    http_client.clone(),
                    config.libretranslate_url.clone(),
                    config.libretranslate_api_key.clone(),
                )),
                ProviderKind::MyMemory => Arc::new(MyMemoryRepository::new(
                    http_client.clone(),
                    config.mymemory_url.clone(),
                )),
                ProviderKind::Google => Arc::new(GoogleTranslateRepository::new(
                    http_client.clone(),
                    config.google_translate_url.clone(),
                )),
            }
        })
        .collect();

    let tts_repo = Arc::new(CommandTtsRepository::new(
        &config.tts_command,
        config.tts_audio_format,
        Duration::from_secs(config.tts_timeout_secs),
    )?);
    tracing::info!(command = %config.tts_command, mode = ?config.tts_mode, "Speech engine configured");

    let audio_store = Arc::new(AudioStore::open(&config.output_dir)?);
    tracing::info!(dir = %audio_store.dir().display(), "Audio output directory ready");

    if let Some(hours) = config.audio_retention_hours {
        spawn_retention_task(
            audio_store.clone(),
            Duration::from_secs(hours.saturating_mul(3600)),
            Duration::from_secs(config.audio_sweep_interval_secs),
        );
        tracing::info!(retention_hours = hours, "Audio retention sweeper started");
    }

    let config = Arc::new(config);
    let app = build_app(
        config.clone(),
        AppDependencies {
            translation_repos,
            tts_repo,
            document_repo,
            audio_store,
        },
    );

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "dubbing_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "dubbing_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
