//! Docvox - 语音 + 图片 AI 问诊演示服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Consultation Context: 图片编码、提示词、问诊三元输出
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Transcriber, ImageLoader, VisionModel, SpeechSynthesizer, AudioOutput）
//! - Commands: Consult 命令与编排处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 单页表单 + 问诊 API
//! - Adapters: Groq Whisper, Groq Vision, Google/HTTP TTS, 文件存储
//! - Telemetry: tracing 初始化

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
