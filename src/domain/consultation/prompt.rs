//! Consultation Context - Prompt
//!
//! 固定的系统提示词与占位文本

/// 每次视觉推理都会附带的系统提示词
pub const SYSTEM_PROMPT: &str = "You have to act as a professional doctor, I know you are not but this is for learning purposes. \
What's in this image? Do you find anything wrong with it medically? \
If you make a differential, suggest some remedies for them. Do not add any numbers or special characters in \
your response. Your response should be in one long paragraph. Also, always answer as if you are answering a real person. \
Do not say 'In the image I see' but say 'With what I see, I think you have ....' \
Do not respond as an AI model in markdown. Your answer should mimic that of an actual doctor, not an AI bot. \
Keep your answer concise (max 2 sentences). No preamble, start your answer right away please.";

/// 未提供语音时的转写占位文本
pub const NO_AUDIO_PLACEHOLDER: &str = "No audio input provided.";

/// 未提供图片时的回答占位文本
pub const NO_IMAGE_PLACEHOLDER: &str = "Image not provided.";

/// 任一阶段失败时返回的问题文本
pub const ERROR_QUESTION: &str = "Error processing input";

/// 发送给视觉语言模型的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub instruction: String,
    pub query: String,
}

impl PromptMessage {
    /// 使用固定系统提示词构造
    pub fn with_system_prompt(query: impl Into<String>) -> Self {
        Self {
            instruction: SYSTEM_PROMPT.to_string(),
            query: query.into(),
        }
    }

    /// 合并后的文本部分；query 为空时只发送指令
    pub fn render(&self) -> String {
        let query = self.query.trim();
        if query.is_empty() {
            self.instruction.clone()
        } else {
            format!("{} {}", self.instruction, query)
        }
    }
}
