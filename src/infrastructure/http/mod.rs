use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    controllers::{
        health::{self, HealthController},
        languages,
        translate::TranslateController,
        tts::TtsController,
    },
    domain::{
        job::JobRecorder,
        translation::TranslationService,
        tts::{TtsService, OUTPUT_URL_PREFIX},
    },
    infrastructure::{
        config::Config,
        middleware::request_id_middleware,
        repositories::{DocumentRepository, TranslationRepository, TtsRepository},
        storage::AudioStore,
    },
};

/// Adapters the application is assembled from
pub struct AppDependencies {
    pub translation_repos: Vec<Arc<dyn TranslationRepository>>,
    pub tts_repo: Arc<dyn TtsRepository>,
    pub document_repo: Option<Arc<dyn DocumentRepository>>,
    pub audio_store: Arc<AudioStore>,
}

/// Build the router with all routes configured
pub fn build_app(config: Arc<Config>, deps: AppDependencies) -> Router {
    let recorder = JobRecorder::new(deps.document_repo);

    let translation_service = Arc::new(TranslationService::new(
        deps.translation_repos,
        Duration::from_secs(config.translation_timeout_secs),
        config.translation_cache_enabled,
    ));
    let tts_service = Arc::new(TtsService::new(deps.tts_repo, deps.audio_store.clone()));

    let health_controller = Arc::new(HealthController::new(
        recorder.clone(),
        config.clone(),
        translation_service.provider_names(),
    ));
    let translate_controller = Arc::new(TranslateController::new(
        translation_service,
        recorder.clone(),
        config.translation_failure_policy,
    ));
    let tts_controller = Arc::new(TtsController::new(tts_service, recorder, config.tts_mode));

    let diagnostics_routes = Router::new()
        .route("/test", get(HealthController::diagnostics))
        .with_state(health_controller);

    let translate_routes = Router::new()
        .route("/translate", post(TranslateController::translate))
        .with_state(translate_controller);

    let tts_routes = Router::new()
        .route("/tts", post(TtsController::synthesize))
        .with_state(tts_controller);

    Router::new()
        .route("/", get(health::root))
        .route("/supported-languages", get(languages::supported_languages))
        .merge(diagnostics_routes)
        .merge(translate_routes)
        .merge(tts_routes)
        .nest_service(OUTPUT_URL_PREFIX, ServeDir::new(deps.audio_store.dir()))
        // Applied innermost-first so the stack is Cors -> Trace -> request id,
        // with axum boxing the body between layers.
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the configured address and serve the application
pub async fn start_http_server(config: Arc<Config>, app: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
