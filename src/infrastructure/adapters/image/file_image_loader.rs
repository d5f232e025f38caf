//! File Image Loader - 从磁盘读取图片并编码
//!
//! 实现 ImageLoaderPort trait

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use crate::application::ports::{ImageCodecError, ImageLoaderPort};
use crate::domain::EncodedImage;

/// 文件系统图片读取器
#[derive(Debug, Clone, Default)]
pub struct FileImageLoader;

impl FileImageLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageLoaderPort for FileImageLoader {
    async fn load(&self, path: &Path) -> Result<EncodedImage, ImageCodecError> {
        let bytes = fs::read(path).await.map_err(|e| ImageCodecError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let image = EncodedImage::from_bytes(&bytes)
            .map_err(|_| ImageCodecError::EmptyImage(path.display().to_string()))?;

        tracing::debug!(
            path = %path.display(),
            size = bytes.len(),
            mime = %image.mime(),
            "Image encoded"
        );

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_round_trips_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.jpg");
        let bytes = vec![0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x43, 0x7F];
        std::fs::write(&path, &bytes).unwrap();

        let image = FileImageLoader::new().load(&path).await.unwrap();

        assert_eq!(image.decode().unwrap(), bytes);
        assert_eq!(image.mime().as_mime(), "image/jpeg");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = FileImageLoader::new().load(&dir.path().join("nope.png")).await;
        assert!(matches!(result, Err(ImageCodecError::ReadFailed { .. })));
    }

    #[tokio::test]
    async fn test_load_empty_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        let result = FileImageLoader::new().load(&path).await;
        assert!(matches!(result, Err(ImageCodecError::EmptyImage(_))));
    }
}
