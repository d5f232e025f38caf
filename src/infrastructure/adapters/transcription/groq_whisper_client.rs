//! Groq Whisper Client - 调用 OpenAI 兼容的语音转写接口
//!
//! 实现 TranscriberPort trait
//!
//! 外部 API:
//! POST {base_url}/audio/transcriptions
//! Request: multipart (file, model, response_format=json, language)
//! Response: {"text": "..."}

use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::application::ports::{TranscriberPort, TranscriptionError, TranscriptionRequest};

/// 转写响应体
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Groq Whisper 客户端配置
#[derive(Debug, Clone)]
pub struct GroqWhisperClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API Key
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 语言提示，None 则由服务自动识别
    pub language: Option<String>,
}

impl Default for GroqWhisperClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
            language: Some("en".to_string()),
        }
    }
}

impl GroqWhisperClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Groq Whisper 客户端
pub struct GroqWhisperClient {
    client: Client,
    config: GroqWhisperClientConfig,
}

impl GroqWhisperClient {
    pub fn new(config: GroqWhisperClientConfig) -> Result<Self, TranscriptionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranscriptionError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn transcriptions_url(&self) -> String {
        format!(
            "{}/audio/transcriptions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

/// 根据扩展名推断录音 MIME 类型
fn audio_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") => "audio/ogg",
        Some("webm") => "audio/webm",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl TranscriberPort for GroqWhisperClient {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<String, TranscriptionError> {
        let path = &request.audio_path;
        let audio_data = tokio::fs::read(path)
            .await
            .map_err(|e| TranscriptionError::AudioRead(format!("{}: {}", path.display(), e)))?;

        if audio_data.is_empty() {
            return Err(TranscriptionError::EmptyAudio(path.display().to_string()));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str(audio_mime(path))
            .map_err(|e| TranscriptionError::ServiceError(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("model", request.model.clone())
            .text("response_format", "json")
            .part("file", file_part);
        if let Some(language) = &self.config.language {
            form = form.text("language", language.clone());
        }

        tracing::debug!(
            url = %self.transcriptions_url(),
            model = %request.model,
            "Sending audio to transcription service"
        );

        let response = self
            .client
            .post(self.transcriptions_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscriptionError::Timeout
                } else if e.is_connect() {
                    TranscriptionError::NetworkError(format!(
                        "Cannot connect to transcription service: {}",
                        e
                    ))
                } else {
                    TranscriptionError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        let transcript = body.text.trim().to_string();

        tracing::info!(chars = transcript.len(), "Transcription completed");

        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::test_support::spawn_mock_server;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_audio(dir: &TempDir, data: &[u8]) -> PathBuf {
        let path = dir.path().join("question.webm");
        std::fs::write(&path, data).unwrap();
        path
    }

    fn request(audio_path: PathBuf) -> TranscriptionRequest {
        TranscriptionRequest {
            audio_path,
            model: "whisper-large-v3".to_string(),
        }
    }

    #[test]
    fn test_audio_mime() {
        assert_eq!(audio_mime(Path::new("a.WAV")), "audio/wav");
        assert_eq!(audio_mime(Path::new("a.webm")), "audio/webm");
        assert_eq!(audio_mime(Path::new("a")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_transcribe_returns_trimmed_text() {
        let app = Router::new().route(
            "/audio/transcriptions",
            post(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth != "Bearer test-key" {
                    return (StatusCode::UNAUTHORIZED, Json(serde_json::json!({})));
                }
                (
                    StatusCode::OK,
                    Json(serde_json::json!({ "text": "  Is this mole dangerous?  " })),
                )
            }),
        );
        let (base_url, shutdown) = spawn_mock_server(app).await;
        let dir = TempDir::new().unwrap();

        let client =
            GroqWhisperClient::new(GroqWhisperClientConfig::new(base_url, "test-key")).unwrap();
        let text = client
            .transcribe(request(write_audio(&dir, b"webm-bytes")))
            .await
            .unwrap();

        assert_eq!(text, "Is this mole dangerous?");
        shutdown.send(()).ok();
    }

    #[tokio::test]
    async fn test_error_status_is_service_error() {
        let app = Router::new().route(
            "/audio/transcriptions",
            post(|| async { (StatusCode::BAD_REQUEST, "unsupported audio") }),
        );
        let (base_url, shutdown) = spawn_mock_server(app).await;
        let dir = TempDir::new().unwrap();

        let client = GroqWhisperClient::new(GroqWhisperClientConfig::new(base_url, "k")).unwrap();
        let err = client
            .transcribe(request(write_audio(&dir, b"garbage")))
            .await
            .unwrap_err();

        match err {
            TranscriptionError::ServiceError(msg) => assert!(msg.contains("unsupported audio")),
            other => panic!("unexpected error: {other:?}"),
        }
        shutdown.send(()).ok();
    }

    #[tokio::test]
    async fn test_empty_audio_rejected_before_request() {
        let dir = TempDir::new().unwrap();
        let client = GroqWhisperClient::new(GroqWhisperClientConfig::new(
            "http://127.0.0.1:9",
            "k",
        ))
        .unwrap();

        let err = client
            .transcribe(request(write_audio(&dir, b"")))
            .await
            .unwrap_err();

        assert!(matches!(err, TranscriptionError::EmptyAudio(_)));
        assert!(err.is_io());
    }

    #[tokio::test]
    async fn test_missing_audio_is_read_error() {
        let client = GroqWhisperClient::new(GroqWhisperClientConfig::new(
            "http://127.0.0.1:9",
            "k",
        ))
        .unwrap();

        let err = client
            .transcribe(request(PathBuf::from("/nonexistent/question.wav")))
            .await
            .unwrap_err();

        assert!(matches!(err, TranscriptionError::AudioRead(_)));
    }
}
