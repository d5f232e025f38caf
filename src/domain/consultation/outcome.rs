//! Consultation Context - Outcome

use std::path::PathBuf;

use super::prompt::ERROR_QUESTION;

/// 一次问诊的三元输出：问题文本、回答文本、回答音频路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationOutcome {
    pub question: String,
    pub answer: String,
    /// 失败时为空
    pub audio_path: Option<PathBuf>,
}

impl ConsultationOutcome {
    pub fn completed(question: String, answer: String, audio_path: PathBuf) -> Self {
        Self {
            question,
            answer,
            audio_path: Some(audio_path),
        }
    }

    /// 失败结果：固定问题文本 + 错误信息，无音频
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self {
            question: ERROR_QUESTION.to_string(),
            answer: format!("An error occurred: {}", error),
            audio_path: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.audio_path.is_none()
    }

    pub fn into_parts(self) -> (String, String, Option<PathBuf>) {
        (self.question, self.answer, self.audio_path)
    }
}
