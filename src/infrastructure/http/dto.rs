//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ConsultationOutcome;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Consult DTOs
// ============================================================================

/// 问诊响应
///
/// 流水线失败时 errno 仍为 0，`audio_url` 为空，错误信息放在 `answer` 中
#[derive(Debug, Serialize)]
pub struct ConsultResponse {
    pub request_id: String,
    /// 语音转写结果
    pub question: String,
    /// 医生回答
    pub answer: String,
    /// 回答音频下载地址
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ConsultResponse {
    pub fn from_outcome(request_id: impl Into<String>, outcome: ConsultationOutcome) -> Self {
        let request_id = request_id.into();
        let audio_url = outcome
            .audio_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(|name| format!("/api/audio/{}?v={}", name, request_id));

        Self {
            request_id,
            question: outcome.question,
            answer: outcome.answer,
            audio_url,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_audio_url_uses_file_name_only() {
        let outcome = ConsultationOutcome::completed(
            "q".into(),
            "a".into(),
            PathBuf::from("data/output/assistant_response.mp3"),
        );
        let response = ConsultResponse::from_outcome("abc", outcome);
        assert_eq!(
            response.audio_url.as_deref(),
            Some("/api/audio/assistant_response.mp3?v=abc")
        );
    }

    #[test]
    fn test_failed_outcome_has_no_audio_url() {
        let response = ConsultResponse::from_outcome("abc", ConsultationOutcome::failed("boom"));
        assert!(response.audio_url.is_none());
        assert_eq!(response.question, "Error processing input");
    }
}
