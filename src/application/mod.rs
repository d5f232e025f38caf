//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Transcriber、VisionModel、SpeechSynthesizer、AudioOutput 等）
//! - commands: 问诊命令及编排处理器
//! - error: 流水线错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{ConsultConfig, ConsultHandler},
    Consult,
};

pub use error::{ErrorKind, PipelineError};

pub use ports::{
    // Audio output
    AudioOutputError,
    AudioOutputPort,
    // Image loader
    ImageCodecError,
    ImageLoaderPort,
    // Speech synthesizer
    SpeechError,
    SpeechSynthesizerPort,
    SynthesizedSpeech,
    // Transcriber
    TranscriberPort,
    TranscriptionError,
    TranscriptionRequest,
    // Vision model
    VisionError,
    VisionModelPort,
    VisionRequest,
};
