// TTS (Text-to-Speech) 平台模块
// 朗读德语单词和对话台词，不支持时调用方按无操作处理

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 德语朗读使用的语言标签
pub const GERMAN: &str = "de-DE";

/// TTS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// 语言代码 (如 "de-DE")
    pub language: String,
    /// 语速 (0.5 - 2.0, 1.0 为正常)
    pub rate: f32,
    /// 音调 (0.5 - 2.0, 1.0 为正常)
    pub pitch: f32,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            language: GERMAN.to_string(),
            rate: 0.9, // 稍慢一点，便于学习
            pitch: 1.0,
        }
    }
}

/// TTS 错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TtsError {
    #[error("TTS 不支持当前平台")]
    NotSupported,

    #[error("不支持的语言: {0}")]
    LanguageNotSupported(String),

    #[error("TTS 播放失败: {0}")]
    SpeakFailed(String),
}

/// 朗读能力
pub trait Speaker {
    fn speak(&self, text: &str, language: &str) -> Result<(), TtsError>;
}

/// 朗读且忽略结果
///
/// 朗读是“发出即忘”的：平台不支持或播放失败都不影响调用方。
pub fn speak_or_ignore<S: Speaker + ?Sized>(speaker: &S, text: &str, language: &str) {
    if let Err(err) = speaker.speak(text, language) {
        tracing::debug!(error = %err, language, "speech skipped");
    }
}

// ============================================
// 统一接口
// ============================================

/// 当前平台的朗读实现
///
/// 终端没有可用的语音合成后端，所有朗读都返回 `NotSupported`，
/// 由 `speak_or_ignore` 当作无操作处理。
#[derive(Debug, Clone, Default)]
pub struct PlatformSpeaker {
    config: TtsConfig,
}

impl PlatformSpeaker {
    pub fn new(config: TtsConfig) -> Self {
        Self { config }
    }
}

impl Speaker for PlatformSpeaker {
    fn speak(&self, text: &str, language: &str) -> Result<(), TtsError> {
        let language = if language.is_empty() {
            self.config.language.as_str()
        } else {
            language
        };
        tracing::trace!(
            text,
            language,
            rate = self.config.rate,
            pitch = self.config.pitch,
            "no speech backend"
        );
        Err(TtsError::NotSupported)
    }
}
