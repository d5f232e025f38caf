//! Audio Output Port - 出站端口
//!
//! 合成音频的落盘位置与写入

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// 音频输出错误
#[derive(Debug, Error)]
pub enum AudioOutputError {
    #[error("Failed to write audio to {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Failed to prune output directory: {0}")]
    PruneFailed(String),
}

/// Audio Output Port - 出站端口
#[async_trait]
pub trait AudioOutputPort: Send + Sync {
    /// 为一次请求分配输出路径
    fn allocate_path(&self, request_id: Uuid) -> PathBuf;

    /// 写入音频，目标文件存在时直接覆盖
    async fn write(&self, path: &Path, data: &[u8]) -> Result<(), AudioOutputError>;

    /// 按文件名解析输出目录内的音频路径
    fn resolve(&self, file_name: &str) -> Result<PathBuf, AudioOutputError>;

    /// 按保留策略清理旧的输出文件，返回删除数量
    async fn prune(&self) -> Result<usize, AudioOutputError>;
}
