//! 内置参考数据
//!
//! 启动时解析一次，之后以只读引用传给各个视图，不持久化、不修改。

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Conversation, GrammarLesson, ThematicPack, VocabularyEntry};

const BUNDLED_DATA: &str = include_str!("../data/german_data.json");

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("内置数据解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 参考数据集合
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceData {
    daily_words: Vec<VocabularyEntry>,
    grammar_lessons: Vec<GrammarLesson>,
    conversations: Vec<Conversation>,
    thematic_packs: Vec<ThematicPack>,
}

impl ReferenceData {
    /// 解析随程序打包的数据
    pub fn bundled() -> Result<Self, ReferenceError> {
        Self::from_json(BUNDLED_DATA)
    }

    pub fn from_json(raw: &str) -> Result<Self, ReferenceError> {
        let data: Self = serde_json::from_str(raw)?;
        tracing::debug!(
            words = data.daily_words.len(),
            lessons = data.grammar_lessons.len(),
            conversations = data.conversations.len(),
            packs = data.thematic_packs.len(),
            "reference data loaded"
        );
        Ok(data)
    }

    /// 首次启动时的默认词表
    pub fn daily_words(&self) -> &[VocabularyEntry] {
        &self.daily_words
    }

    pub fn grammar_lessons(&self) -> &[GrammarLesson] {
        &self.grammar_lessons
    }

    pub fn grammar_lesson(&self, id: &str) -> Option<&GrammarLesson> {
        self.grammar_lessons.iter().find(|l| l.id == id)
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn thematic_packs(&self) -> &[ThematicPack] {
        &self.thematic_packs
    }
}
