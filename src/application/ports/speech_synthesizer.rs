//! Speech Synthesizer Port - TTS 引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizedSpeech {
    /// MP3 音频数据
    pub audio_data: Vec<u8>,
    /// 实际请求 TTS 服务的次数（空文本为 0）
    pub request_count: usize,
}

/// Speech Synthesizer Port
///
/// 外部 TTS 服务的抽象接口。空文本不应报错，返回一段静音
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedSpeech, SpeechError>;

    /// 检查 TTS 服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
