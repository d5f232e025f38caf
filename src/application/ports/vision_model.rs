//! Vision Model Port - 视觉语言模型抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{EncodedImage, PromptMessage};

/// 视觉推理错误
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 服务返回了零个 completion choice
    #[error("empty response")]
    EmptyResponse,
}

/// 视觉推理请求
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub prompt: PromptMessage,
    pub image: EncodedImage,
    /// 视觉语言模型 ID
    pub model: String,
}

/// Vision Model Port
///
/// 多模态 chat completion 服务的抽象接口，返回第一个 choice 的文本
#[async_trait]
pub trait VisionModelPort: Send + Sync {
    async fn infer(&self, request: VisionRequest) -> Result<String, VisionError>;
}
