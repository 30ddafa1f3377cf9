//! 数据模型定义
//!
//! 词汇条目与只读参考数据（语法课、对话脚本、主题词包）的结构。
//! 序列化字段名与本地持久化格式保持一致。

use serde::{Deserialize, Serialize};

// ============================================================
// Level - 难度等级
// ============================================================

/// 欧标难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    A1,
    A2,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Some(Self::A1),
            "A2" => Some(Self::A2),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================
// VocabularyEntry - 词汇条目
// ============================================================

/// 词汇条目
///
/// 创建后不可修改，只能删除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// 唯一标识（内置词为 `w1`..`w10`，用户添加的词为毫秒时间戳）
    pub id: String,
    /// 德语词条（名词带冠词）
    pub german: String,
    /// 阿拉伯语释义
    pub arabic: String,
    /// 英语释义
    pub english: String,
    /// 例句，可为空
    pub example: String,
    /// 难度等级
    pub level: Level,
    /// 分类标签（自由文本）
    pub category: String,
}

// ============================================================
// 参考数据（只读）
// ============================================================

/// 语法例句
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarExample {
    pub german: String,
    pub arabic: String,
}

/// 语法课
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarLesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub examples: Vec<GrammarExample>,
}

/// 对话中的一句台词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLine {
    /// 说话人标记（如 "A" / "B"）
    pub speaker: String,
    /// 德语原文
    pub text: String,
    /// 阿拉伯语翻译
    pub translation: String,
}

/// 对话脚本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub dialogue: Vec<ConversationLine>,
}

/// 主题词包
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThematicPack {
    pub id: String,
    pub title: String,
    pub words_count: u32,
    pub level: Level,
}
