//! File Audio Output - 文件系统音频输出实现
//!
//! 实现 AudioOutputPort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{AudioOutputError, AudioOutputPort};

/// 输出文件命名方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNaming {
    /// 固定文件名，每次调用覆盖
    Fixed(String),
    /// 每个请求一个文件：`{request_id}.mp3`
    PerRequest,
}

/// 输出文件保留策略（仅 PerRequest 模式生效）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// 超过该时长的文件会被删除，None 表示不按时间清理
    pub max_age: Option<Duration>,
    /// 最多保留的文件数（按修改时间保留最新的），None 表示不限
    pub max_files: Option<usize>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_age: Some(Duration::from_secs(3600)),
            max_files: Some(100),
        }
    }
}

impl RetentionPolicy {
    /// 不清理任何文件
    pub fn keep_all() -> Self {
        Self {
            max_age: None,
            max_files: None,
        }
    }

    /// 从已按修改时间降序排列的文件中挑出需要删除的
    fn select_expired(&self, files: Vec<(PathBuf, SystemTime)>, now: SystemTime) -> Vec<PathBuf> {
        files
            .into_iter()
            .enumerate()
            .filter(|(index, (_, modified))| {
                let too_old = self.max_age.is_some_and(|max_age| {
                    now.duration_since(*modified).unwrap_or_default() > max_age
                });
                let over_limit = self.max_files.is_some_and(|max| *index >= max);
                too_old || over_limit
            })
            .map(|(_, (path, _))| path)
            .collect()
    }
}

/// 文件系统音频输出
pub struct FileAudioOutput {
    /// 输出根目录
    base_dir: PathBuf,
    naming: OutputNaming,
    retention: RetentionPolicy,
}

impl FileAudioOutput {
    pub fn new(base_dir: impl AsRef<Path>, naming: OutputNaming) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            naming,
            retention: RetentionPolicy::default(),
        }
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// 列出输出目录中的 mp3 文件，按修改时间从新到旧排序
    async fn list_outputs(&self) -> Result<Vec<(PathBuf, SystemTime)>, AudioOutputError> {
        let prune_failed = |e: std::io::Error| AudioOutputError::PruneFailed(e.to_string());

        let mut entries = match fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(prune_failed(e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(prune_failed)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("mp3") {
                continue;
            }
            let metadata = entry.metadata().await.map_err(prune_failed)?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().map_err(prune_failed)?;
            files.push((path, modified));
        }

        files.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(files)
    }

    fn validate_file_name(file_name: &str) -> Result<(), AudioOutputError> {
        let invalid = file_name.is_empty()
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name.contains("..");
        if invalid {
            return Err(AudioOutputError::InvalidFileName(file_name.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AudioOutputPort for FileAudioOutput {
    fn allocate_path(&self, request_id: Uuid) -> PathBuf {
        match &self.naming {
            OutputNaming::Fixed(name) => self.base_dir.join(name),
            OutputNaming::PerRequest => self.base_dir.join(format!("{}.mp3", request_id)),
        }
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<(), AudioOutputError> {
        let write_failed = |e: std::io::Error| AudioOutputError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(write_failed)?;
        }

        fs::write(path, data).await.map_err(write_failed)?;

        tracing::debug!(path = %path.display(), size = data.len(), "Saved response audio");

        Ok(())
    }

    fn resolve(&self, file_name: &str) -> Result<PathBuf, AudioOutputError> {
        Self::validate_file_name(file_name)?;

        let path = self.base_dir.join(file_name);
        if !path.is_file() {
            return Err(AudioOutputError::FileNotFound(file_name.to_string()));
        }

        Ok(path)
    }

    async fn prune(&self) -> Result<usize, AudioOutputError> {
        // 固定文件名模式只有一个文件，由覆盖写入维护
        if let OutputNaming::Fixed(_) = self.naming {
            return Ok(0);
        }

        let files = self.list_outputs().await?;
        let expired = self.retention.select_expired(files, SystemTime::now());

        let mut removed = 0;
        for path in expired {
            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                // 并发请求可能已删除同一文件
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(AudioOutputError::PruneFailed(e.to_string())),
            }
        }

        if removed > 0 {
            tracing::debug!(dir = %self.base_dir.display(), removed, "Pruned old response audio");
        }

        Ok(removed)
    }
}
