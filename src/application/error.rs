//! 应用层错误定义
//!
//! 问诊流水线的统一错误类型

use thiserror::Error;

use crate::application::ports::{
    AudioOutputError, ImageCodecError, SpeechError, TranscriptionError, VisionError,
};

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 本地文件访问
    Io,
    /// 远程服务调用（网络、鉴权、响应异常、空响应）
    Service,
}

/// 流水线错误
///
/// Display 直接使用各阶段的错误信息
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error(transparent)]
    ImageCodec(#[from] ImageCodecError),

    #[error(transparent)]
    Vision(#[from] VisionError),

    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error(transparent)]
    AudioOutput(#[from] AudioOutputError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transcription(e) if e.is_io() => ErrorKind::Io,
            Self::ImageCodec(_) | Self::AudioOutput(_) => ErrorKind::Io,
            Self::Transcription(_) | Self::Vision(_) | Self::Speech(_) => ErrorKind::Service,
        }
    }

    /// 失败的阶段名（用于日志）
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Transcription(_) => "transcribe",
            Self::ImageCodec(_) => "encode",
            Self::Vision(_) => "infer",
            Self::Speech(_) | Self::AudioOutput(_) => "synthesize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_classification() {
        let io: PipelineError = TranscriptionError::AudioRead("missing".into()).into();
        assert_eq!(io.kind(), ErrorKind::Io);

        let service: PipelineError = VisionError::EmptyResponse.into();
        assert_eq!(service.kind(), ErrorKind::Service);
        assert_eq!(service.to_string(), "empty response");
        assert_eq!(service.stage(), "infer");
    }
}
