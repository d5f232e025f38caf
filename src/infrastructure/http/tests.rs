//! Router 级别测试：fake 端口 + tower oneshot

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

use super::{build_router, AppState};
use crate::application::{
    ConsultConfig, ConsultHandler, SpeechError, SpeechSynthesizerPort, SynthesizedSpeech,
    TranscriberPort, TranscriptionError, TranscriptionRequest, VisionError, VisionModelPort,
    VisionRequest,
};
use crate::infrastructure::adapters::{
    FileAudioOutput, FileImageLoader, OutputNaming, UploadStaging,
};

const BOUNDARY: &str = "docvox-test-boundary";

struct StaticTranscriber;

#[async_trait]
impl TranscriberPort for StaticTranscriber {
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<String, TranscriptionError> {
        assert!(request.audio_path.exists());
        Ok("Does this look infected?".to_string())
    }
}

struct StaticVision;

#[async_trait]
impl VisionModelPort for StaticVision {
    async fn infer(&self, request: VisionRequest) -> Result<String, VisionError> {
        Ok(format!("Answer to: {}", request.prompt.query))
    }
}

struct EchoSynthesizer;

#[async_trait]
impl SpeechSynthesizerPort for EchoSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedSpeech, SpeechError> {
        Ok(SynthesizedSpeech {
            audio_data: text.as_bytes().to_vec(),
            request_count: 1,
        })
    }
}

fn test_router(dir: &TempDir) -> Router {
    let output = Arc::new(FileAudioOutput::new(
        dir.path().join("output"),
        OutputNaming::PerRequest,
    ));
    let handler = ConsultHandler::new(
        Arc::new(StaticTranscriber),
        Arc::new(FileImageLoader::new()),
        Arc::new(StaticVision),
        Arc::new(EchoSynthesizer),
        output.clone(),
        ConsultConfig::default(),
    );
    let state = AppState::new(handler, output, UploadStaging::new(dir.path().join("uploads")));

    build_router(Arc::new(state), 1024 * 1024)
}

/// 构造 multipart 请求体：(字段名, 文件名, content-type, 数据)
fn multipart_body(parts: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content_type, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn consult_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/consult")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ping() {
    let dir = TempDir::new().unwrap();
    let response = test_router(&dir)
        .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_index_serves_form() {
    let dir = TempDir::new().unwrap();
    let response = test_router(&dir)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/api/consult"));
}

#[tokio::test]
async fn test_consult_without_inputs_returns_placeholders() {
    let dir = TempDir::new().unwrap();
    let body = multipart_body(&[("image", "", "application/octet-stream", b"")]);

    let response = test_router(&dir)
        .oneshot(consult_request(body))
        .await
        .unwrap();
    let body = json_body(response).await;

    assert_eq!(body["errno"], 0);
    assert_eq!(body["data"]["question"], "No audio input provided.");
    assert_eq!(body["data"]["answer"], "Image not provided.");
    assert!(body["data"]["audio_url"]
        .as_str()
        .unwrap()
        .starts_with("/api/audio/"));
}

#[tokio::test]
async fn test_consult_full_flow_and_download() {
    let dir = TempDir::new().unwrap();
    let router = test_router(&dir);
    let body = multipart_body(&[
        ("audio", "question.webm", "audio/webm", b"webm-bytes"),
        ("image", "arm.png", "image/png", b"\x89PNG\r\n\x1a\n....."),
    ]);

    let response = router.clone().oneshot(consult_request(body)).await.unwrap();
    let body = json_body(response).await;

    assert_eq!(body["data"]["question"], "Does this look infected?");
    assert_eq!(body["data"]["answer"], "Answer to: Does this look infected?");

    // 上传暂存文件在请求结束后被清理
    let leftover = std::fs::read_dir(dir.path().join("uploads")).unwrap().count();
    assert_eq!(leftover, 0);

    let audio_url = body["data"]["audio_url"].as_str().unwrap().to_string();
    let response = router
        .oneshot(Request::get(audio_url).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Answer to: Does this look infected?");
}

#[tokio::test]
async fn test_consult_rejects_unsupported_image() {
    let dir = TempDir::new().unwrap();
    let body = multipart_body(&[("image", "notes.txt", "text/plain", b"hello")]);

    let response = test_router(&dir)
        .oneshot(consult_request(body))
        .await
        .unwrap();
    let body = json_body(response).await;

    assert_eq!(body["errno"], 400);
}

#[tokio::test]
async fn test_consult_forwards_uncommon_image_formats() {
    let dir = TempDir::new().unwrap();
    let body = multipart_body(&[("image", "scan.bmp", "image/bmp", b"BM\x36\x00....")]);

    let response = test_router(&dir)
        .oneshot(consult_request(body))
        .await
        .unwrap();
    let body = json_body(response).await;

    assert_eq!(body["errno"], 0);
    assert_eq!(body["data"]["answer"], "Answer to: No audio input provided.");
}

#[tokio::test]
async fn test_download_unknown_audio_is_not_found() {
    let dir = TempDir::new().unwrap();
    let response = test_router(&dir)
        .oneshot(
            Request::get("/api/audio/missing.mp3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;

    assert_eq!(body["errno"], 404);
}
