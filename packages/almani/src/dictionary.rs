//! 词典视图逻辑：搜索过滤与添加表单校验

use thiserror::Error;

use crate::models::{Level, VocabularyEntry};

/// 未填写分类时使用的默认值
pub const DEFAULT_CATEGORY: &str = "General";

/// 等级过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Only(Level),
}

impl LevelFilter {
    pub fn matches(&self, level: Level) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == level,
        }
    }
}

/// 搜索词条
///
/// 德语与英语不区分大小写匹配子串，阿拉伯语按原文匹配子串；空查询匹配全部。
pub fn search<'a>(
    words: &'a [VocabularyEntry],
    query: &str,
    filter: LevelFilter,
) -> Vec<&'a VocabularyEntry> {
    let needle = query.to_lowercase();

    words
        .iter()
        .filter(|w| {
            let matches_text = w.german.to_lowercase().contains(&needle)
                || w.english.to_lowercase().contains(&needle)
                || w.arabic.contains(query);
            matches_text && filter.matches(w.level)
        })
        .collect()
}

// ============================================================
// 添加表单
// ============================================================

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("缺少必填字段: {0}")]
    MissingField(&'static str),
}

/// 添加单词表单
#[derive(Debug, Clone, Default)]
pub struct NewWordForm {
    pub german: String,
    pub english: String,
    pub arabic: String,
    pub example: String,
    pub level: Level,
    pub category: String,
}

impl NewWordForm {
    /// 校验必填字段（德语、英语、阿拉伯语）并生成词条
    pub fn into_entry(self, id: String) -> Result<VocabularyEntry, FormError> {
        require("german", &self.german)?;
        require("english", &self.english)?;
        require("arabic", &self.arabic)?;

        let category = if self.category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            self.category
        };

        Ok(VocabularyEntry {
            id,
            german: self.german,
            arabic: self.arabic,
            english: self.english,
            example: self.example,
            level: self.level,
            category,
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(())
}

/// 基于当前毫秒时间戳生成新 ID，遇到已占用的 ID 时递增
pub fn fresh_id<F>(is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut candidate = chrono::Utc::now().timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !is_taken(&id) {
            return id;
        }
        candidate += 1;
    }
}
