//! Image Loader Port - 图片读取与编码

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::EncodedImage;

/// 图片编码错误
#[derive(Debug, Error)]
pub enum ImageCodecError {
    #[error("Failed to read image {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Image file is empty: {0}")]
    EmptyImage(String),
}

/// Image Loader Port
#[async_trait]
pub trait ImageLoaderPort: Send + Sync {
    /// 读取图片并编码为 base64
    async fn load(&self, path: &Path) -> Result<EncodedImage, ImageCodecError>;
}
