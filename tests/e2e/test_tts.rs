use crate::e2e::helpers;

use dubbing_backend::domain::tts::AudioFormat;
use dubbing_backend::infrastructure::config::TtsMode;
use dubbing_backend::infrastructure::repositories::{CommandTtsRepository, DocumentRepository};
use helpers::fakes::{EngineReply, FailingStore, FakeEngine, MemoryStore, FAKE_AUDIO};
use helpers::{TestContext, TestOptions};
use hyper::StatusCode;
use regex::Regex;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use test_context::test_context;

fn audio_url_pattern() -> Regex {
    Regex::new(r"^/outputs/(tts_[0-9a-f]{32}\.mp3)$").unwrap()
}

async fn context_with_engine(engine: Arc<FakeEngine>) -> TestContext {
    TestContext::with(TestOptions {
        engine,
        ..TestOptions::default()
    })
    .await
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_and_serve_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({"text": "नमस्ते", "language": "hi"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body();
    assert_eq!(body.as_object().unwrap().len(), 1);
    let audio_url = body["audio_url"].as_str().unwrap();
    let filename = audio_url_pattern()
        .captures(audio_url)
        .unwrap_or_else(|| panic!("unexpected audio url {}", audio_url))[1]
        .to_string();

    assert_eq!(ctx.audio_files(), vec![filename]);

    let audio = ctx.client.get(audio_url).await.unwrap();
    audio.assert_status(StatusCode::OK);
    assert_eq!(audio.body_bytes, FAKE_AUDIO);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/outputs/tts_00000000000000000000000000000000.mp3")
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_unique_filenames_for_identical_requests(ctx: &TestContext) {
    let body = json!({"text": "same text", "language": "ta"});
    let requests = (0..100).map(|_| ctx.client.post("/tts", &body));
    let responses = futures::future::join_all(requests).await;

    let urls: HashSet<String> = responses
        .into_iter()
        .map(|response| {
            let response = response.unwrap();
            response.assert_status(StatusCode::OK);
            response.body()["audio_url"].as_str().unwrap().to_string()
        })
        .collect();

    assert_eq!(urls.len(), 100);
    assert_eq!(ctx.audio_files().len(), 100);
}

#[tokio::test]
async fn it_should_reject_unsupported_language_before_synthesis() {
    let engine = FakeEngine::new(EngineReply::Audio);
    let ctx = context_with_engine(engine.clone()).await;

    let response = ctx
        .client
        .post("/tts", &json!({"text": "Hello", "language": "fr"}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unsupported language for TTS");
    assert_eq!(engine.calls(), 0);
    assert!(ctx.audio_files().is_empty());
}

#[tokio::test]
async fn it_should_reject_language_codes_that_are_not_exact() {
    let engine = FakeEngine::new(EngineReply::Audio);
    let ctx = context_with_engine(engine.clone()).await;

    for code in ["Ta", " hi ", "HI"] {
        ctx.client
            .post("/tts", &json!({"text": "Hello", "language": code}))
            .await
            .unwrap()
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("Unsupported language for TTS");
    }

    assert_eq!(engine.calls(), 0);
    assert!(ctx.audio_files().is_empty());
}

#[tokio::test]
async fn it_should_validate_text_and_voice() {
    let engine = FakeEngine::new(EngineReply::Audio);
    let ctx = context_with_engine(engine.clone()).await;

    ctx.client
        .post("/tts", &json!({"text": "", "language": "hi"}))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.client
        .post("/tts", &json!({"text": "a".repeat(10001), "language": "hi"}))
        .await
        .unwrap()
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE);

    ctx.client
        .post("/tts", &json!({"text": "Hello", "language": "hi", "voice": "$(whoami)"}))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid voice");

    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn it_should_report_failed_synthesis_with_alternative() {
    let ctx = context_with_engine(FakeEngine::new(EngineReply::Fail("no voice for language"))).await;

    let response = ctx
        .client
        .post("/tts", &json!({"text": "ନମସ୍କାର", "language": "or"}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("Odia (or)")
        .assert_error_message("no voice for language")
        .assert_error_message("'hi'");
    assert!(ctx.audio_files().is_empty());
}

#[tokio::test]
async fn it_should_suggest_bengali_when_hindi_fails() {
    let ctx = context_with_engine(FakeEngine::new(EngineReply::Fail("quota exceeded"))).await;

    let response = ctx
        .client
        .post("/tts", &json!({"text": "नमस्ते", "language": "hi"}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("Hindi (hi)")
        .assert_error_message("'bn'");
}

#[tokio::test]
async fn it_should_report_missing_engine_as_server_error() {
    let ctx = context_with_engine(FakeEngine::new(EngineReply::Missing)).await;

    let response = ctx
        .client
        .post("/tts", &json!({"text": "Hello", "language": "te"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn it_should_return_demo_message_in_demo_mode() {
    let engine = FakeEngine::new(EngineReply::Audio);
    let ctx = TestContext::with(TestOptions {
        engine: engine.clone(),
        tts_mode: TtsMode::Demo,
        ..TestOptions::default()
    })
    .await;

    let response = ctx
        .client
        .post("/tts", &json!({"text": "Hello", "language": "as"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body(),
        &json!({
            "message": "TTS demo endpoint - integrate with a real TTS provider for audio output.",
            "language": "as"
        })
    );
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn it_should_record_generated_audio_job() {
    let store = Arc::new(MemoryStore::default());
    let ctx = TestContext::with(TestOptions {
        store: Some(store.clone() as Arc<dyn DocumentRepository>),
        ..TestOptions::default()
    })
    .await;

    let response = ctx
        .client
        .post("/tts", &json!({"text": "नमस्ते", "language": "hi", "voice": "hi-IN"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body()["job_id"], "job-1");

    let records = store.records();
    let job = &records[0].1;
    let audio_url = response.body()["audio_url"].as_str().unwrap();
    assert_eq!(job["status"], "tts_generated");
    assert_eq!(job["target_language"], "hi");
    assert_eq!(format!("/outputs/{}", job["audio_filename"].as_str().unwrap()), audio_url);
    assert_eq!(job["meta"]["voice"], "hi-IN");
    assert_eq!(job["meta"]["audio_format"], "mp3");
    assert_eq!(job["meta"]["audio_bytes"], FAKE_AUDIO.len());
}

#[tokio::test]
async fn it_should_answer_identically_when_persistence_fails() {
    let request = json!({"text": "నమస్కారం", "language": "te"});

    let disabled = TestContext::with(TestOptions::default()).await;
    let failing = TestContext::with(TestOptions {
        store: Some(Arc::new(FailingStore) as Arc<dyn DocumentRepository>),
        ..TestOptions::default()
    })
    .await;

    let expected = disabled.client.post("/tts", &request).await.unwrap();
    let actual = failing.client.post("/tts", &request).await.unwrap();

    assert_eq!(actual.status, expected.status);
    actual.assert_status(StatusCode::OK);

    let keys = |body: &serde_json::Value| -> Vec<String> {
        body.as_object().unwrap().keys().cloned().collect()
    };
    assert_eq!(keys(actual.body()), vec!["audio_url".to_string()]);
    assert_eq!(keys(actual.body()), keys(expected.body()));

    let audio_url = actual.body()["audio_url"].as_str().unwrap();
    let filename = audio_url_pattern().captures(audio_url).unwrap()[1].to_string();
    assert_eq!(failing.audio_files(), vec![filename]);

    let audio = failing.client.get(audio_url).await.unwrap();
    audio.assert_status(StatusCode::OK);
    assert_eq!(audio.body_bytes, FAKE_AUDIO);
}

#[cfg(unix)]
#[tokio::test]
async fn it_should_synthesize_through_a_local_command() {
    // `cat` stands in for a real engine: the audio is the text itself
    let engine = CommandTtsRepository::new("cat", AudioFormat::Mp3, Duration::from_secs(5)).unwrap();
    let ctx = TestContext::with(TestOptions {
        engine: Arc::new(engine),
        ..TestOptions::default()
    })
    .await;

    let response = ctx
        .client
        .post("/tts", &json!({"text": "ਸਤ ਸ੍ਰੀ ਅਕਾਲ", "language": "pa"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let audio_url = response.body()["audio_url"].as_str().unwrap().to_string();
    assert!(audio_url_pattern().is_match(&audio_url));

    let audio = ctx.client.get(&audio_url).await.unwrap();
    audio.assert_status(StatusCode::OK);
    assert_eq!(audio.body_bytes, "ਸਤ ਸ੍ਰੀ ਅਕਾਲ".as_bytes());
}
