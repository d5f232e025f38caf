//! Consult Commands

use std::path::PathBuf;
use uuid::Uuid;

/// 问诊命令
///
/// 两个输入相互独立，均可缺省
#[derive(Debug, Clone)]
pub struct Consult {
    /// 请求 ID，用于分配输出路径和日志追踪
    pub request_id: Uuid,
    /// 录音文件路径
    pub audio_path: Option<PathBuf>,
    /// 图片文件路径
    pub image_path: Option<PathBuf>,
}

impl Consult {
    pub fn new(audio_path: Option<PathBuf>, image_path: Option<PathBuf>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            audio_path,
            image_path,
        }
    }
}
