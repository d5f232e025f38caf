//! HTTP TTS Client - 调用 OpenAI 兼容的语音合成接口
//!
//! 实现 SpeechSynthesizerPort trait，可替换默认的 Google TTS
//!
//! 外部 TTS API:
//! POST {base_url}/audio/speech
//! Request: {"model": "...", "input": "...", "voice": "...", "response_format": "mp3"}  (JSON)
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::silence::silent_mp3;
use crate::application::ports::{SpeechError, SpeechSynthesizerPort, SynthesizedSpeech};

/// TTS 请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    model: &'a str,
    /// 要合成的文本
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// API Key
    pub api_key: String,
    /// TTS 模型
    pub model: String,
    /// 音色
    pub voice: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "playai-tts".to_string(),
            voice: "Fritz-PlayAI".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP TTS 客户端
///
/// 通过 HTTP 调用外部 TTS 服务
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.config.base_url.trim_end_matches('/'))
    }

    /// 获取健康检查 URL
    fn models_url(&self) -> String {
        format!("{}/models", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SpeechSynthesizerPort for HttpTtsClient {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedSpeech, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SynthesizedSpeech {
                audio_data: silent_mp3(),
                request_count: 0,
            });
        }

        let http_request = SpeechHttpRequest {
            model: &self.config.model,
            input: text,
            voice: &self.config.voice,
            response_format: "mp3",
        };

        tracing::debug!(
            url = %self.speech_url(),
            text_len = text.len(),
            voice = %self.config.voice,
            "Sending TTS request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.config.api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else if e.is_connect() {
                    SpeechError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    SpeechError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 直接获取音频字节
        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(audio_size = audio_data.len(), "TTS synthesis completed");

        Ok(SynthesizedSpeech {
            audio_data,
            request_count: 1,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.models_url())
            .bearer_auth(&self.config.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::test_support::spawn_mock_server;
    use axum::{routing::post, Json, Router};
    use serde_json::Value;

    #[test]
    fn test_config_default() {
        let config = HttpTtsClientConfig::default();
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTtsClientConfig::new("http://example.com:9000").with_timeout(60);
        assert_eq!(config.base_url, "http://example.com:9000");
        assert_eq!(config.timeout_secs, 60);
    }

    #[tokio::test]
    async fn test_synthesize_returns_body_bytes() {
        let app = Router::new().route(
            "/audio/speech",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["response_format"], "mp3");
                format!("mp3:{}", body["input"].as_str().unwrap_or_default())
            }),
        );
        let (base_url, shutdown) = spawn_mock_server(app).await;

        let client = HttpTtsClient::new(HttpTtsClientConfig::new(base_url)).unwrap();
        let speech = client.synthesize("Drink more water.").await.unwrap();

        assert_eq!(speech.audio_data, b"mp3:Drink more water.".to_vec());
        shutdown.send(()).ok();
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_network_error() {
        let client = HttpTtsClient::new(HttpTtsClientConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client.synthesize("hello").await.unwrap_err();
        assert!(matches!(err, SpeechError::NetworkError(_) | SpeechError::Timeout));
    }
}
