//! Groq Vision Client - 调用 OpenAI 兼容的 chat completion 接口
//!
//! 实现 VisionModelPort trait
//!
//! 外部 API:
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [{"role": "user", "content": [text, image_url]}]}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{VisionError, VisionModelPort, VisionRequest};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Groq Vision 客户端配置
#[derive(Debug, Clone)]
pub struct GroqVisionClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API Key
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GroqVisionClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 120,
        }
    }
}

impl GroqVisionClientConfig {
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

/// Groq Vision 客户端
pub struct GroqVisionClient {
    client: Client,
    config: GroqVisionClientConfig,
}

impl GroqVisionClient {
    pub fn new(config: GroqVisionClientConfig) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VisionError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

fn build_request(request: &VisionRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: request.model.clone(),
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text {
                    text: request.prompt.render(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: request.image.data_uri(),
                    },
                },
            ],
        }],
        stream: false,
    }
}

/// 取第一个 choice 的文本
fn first_answer(completion: ChatCompletion) -> Result<String, VisionError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(VisionError::EmptyResponse)
}

#[async_trait]
impl VisionModelPort for GroqVisionClient {
    async fn infer(&self, request: VisionRequest) -> Result<String, VisionError> {
        let body = build_request(&request);

        tracing::debug!(
            url = %self.completions_url(),
            model = %request.model,
            image_size = request.image.len(),
            "Sending vision completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VisionError::Timeout
                } else if e.is_connect() {
                    VisionError::NetworkError(format!("Cannot connect to vision service: {}", e))
                } else {
                    VisionError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(VisionError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| VisionError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse chat completion JSON"
            );
            VisionError::InvalidResponse(e.to_string())
        })?;

        let answer = first_answer(completion)?;

        tracing::info!(chars = answer.len(), "Vision inference completed");

        Ok(answer)
    }
}
