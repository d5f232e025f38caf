//! Transcriber Port - 语音转写抽象
//!
//! 定义语音识别的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 转写错误
#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("Failed to read audio file: {0}")]
    AudioRead(String),

    #[error("Audio file is empty: {0}")]
    EmptyAudio(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TranscriptionError {
    /// 是否为本地文件访问错误
    pub fn is_io(&self) -> bool {
        matches!(self, Self::AudioRead(_) | Self::EmptyAudio(_))
    }
}

/// 转写请求
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// 录音文件路径
    pub audio_path: PathBuf,
    /// 语音识别模型 ID
    pub model: String,
}

/// Transcriber Port
///
/// 外部语音识别服务的抽象接口
#[async_trait]
pub trait TranscriberPort: Send + Sync {
    /// 转写录音，未检测到语音时可返回空字符串
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<String, TranscriptionError>;
}
