//! 首页概览

use crate::models::VocabularyEntry;
use crate::storage::KeyValueStore;
use crate::store::LearnerStore;

/// 首页展示的今日单词数
pub const TODAY_WORD_COUNT: usize = 5;

/// 首页概览数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeSummary {
    pub streak: u32,
    /// 词汇集合的前几个词
    pub today_words: Vec<VocabularyEntry>,
    pub learned_count: usize,
    pub total_words: usize,
}

impl HomeSummary {
    pub fn from_store<S: KeyValueStore>(store: &LearnerStore<S>) -> Self {
        let words = store.list_vocabulary();
        let learned_count = words.iter().filter(|w| store.is_learned(&w.id)).count();

        Self {
            streak: store.streak(),
            today_words: words.iter().take(TODAY_WORD_COUNT).cloned().collect(),
            learned_count,
            total_words: words.len(),
        }
    }

    /// 掌握进度百分比（0-100）
    pub fn progress_percent(&self) -> u8 {
        if self.total_words == 0 {
            return 0;
        }
        ((self.learned_count * 100) / self.total_words) as u8
    }
}
