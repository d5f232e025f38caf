//! Upload Staging - 上传文件暂存
//!
//! HTTP 层收到的录音和图片先落盘为请求级临时文件，编排完成后删除

use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// 上传暂存目录
pub struct UploadStaging {
    base_dir: PathBuf,
}

impl UploadStaging {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// 暂存路径：`{request_id}_{field}.{ext}`
    pub fn staged_path(&self, request_id: Uuid, field: &str, ext: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}_{}.{}", request_id, field, ext))
    }

    /// 写入上传内容
    pub async fn stage(
        &self,
        request_id: Uuid,
        field: &str,
        ext: &str,
        data: &[u8],
    ) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.base_dir).await?;

        let path = self.staged_path(request_id, field, ext);
        fs::write(&path, data).await?;

        tracing::debug!(
            request_id = %request_id,
            field = field,
            size = data.len(),
            "Upload staged"
        );

        Ok(path)
    }

    /// 删除暂存文件，失败只记录日志
    pub async fn cleanup(&self, paths: &[PathBuf]) {
        for path in paths {
            if let Err(e) = fs::remove_file(path).await {
                tracing::warn!(path = %path.display(), "Failed to remove staged upload: {}", e);
            }
        }
    }
}
