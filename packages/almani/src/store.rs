//! 学习者状态存储
//!
//! 持有三个可变集合（词汇、已掌握 ID、连续学习计数），每次修改后立即把受影响的
//! 集合整体写回键值后端。进程内只有一个写入方。

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::VocabularyEntry;
use crate::storage::snapshot::{self, LEARNED_KEY, STREAK_KEY, WORDS_KEY};
use crate::storage::{KeyValueStore, StorageError};

// ============================================================
// 错误类型定义
// ============================================================

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("词条 ID 不能为空")]
    EmptyId,

    #[error("词条 ID 已存在: {0}")]
    DuplicateId(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================
// LearnerStore
// ============================================================

/// 学习者状态存储
///
/// 写入失败时内存状态保留修改并返回错误，持久化副本落后到下一次成功写入为止。
pub struct LearnerStore<S> {
    backend: S,
    words: Vec<VocabularyEntry>,
    learned: BTreeSet<String>,
    streak: u32,
}

impl<S: KeyValueStore> LearnerStore<S> {
    /// 从后端加载三个集合
    ///
    /// 任一键缺失、读取失败或无法解码时使用默认值（`seed` 词表、空集合、0），
    /// 不会向调用方返回错误。被替换或仍为旧格式的键会立即按当前格式写回。
    pub fn initialize(backend: S, seed: &[VocabularyEntry]) -> Self {
        let (words, words_dirty) = load_or_default(&backend, WORDS_KEY, || seed.to_vec());
        let (learned, learned_dirty) = load_or_default(&backend, LEARNED_KEY, BTreeSet::new);
        let (streak, streak_dirty) = load_or_default(&backend, STREAK_KEY, || 0u32);

        let store = Self {
            backend,
            words,
            learned,
            streak,
        };

        if words_dirty {
            log_rewrite(WORDS_KEY, store.persist_words());
        }
        if learned_dirty {
            log_rewrite(LEARNED_KEY, store.persist_learned());
        }
        if streak_dirty {
            log_rewrite(STREAK_KEY, store.persist_streak());
        }

        tracing::info!(
            words = store.words.len(),
            learned = store.learned.len(),
            streak = store.streak,
            "learner store initialized"
        );

        store
    }

    // ========== 词汇 ==========

    /// 当前词汇集合，通过界面添加的词排在最前
    pub fn list_vocabulary(&self) -> &[VocabularyEntry] {
        &self.words
    }

    pub fn get(&self, id: &str) -> Option<&VocabularyEntry> {
        self.words.iter().find(|w| w.id == id)
    }

    /// 添加词条到集合最前面并持久化
    pub fn add_vocabulary(&mut self, entry: VocabularyEntry) -> StoreResult<()> {
        if entry.id.is_empty() {
            return Err(StoreError::EmptyId);
        }
        if self.get(&entry.id).is_some() {
            return Err(StoreError::DuplicateId(entry.id));
        }

        tracing::debug!(id = %entry.id, german = %entry.german, "adding vocabulary entry");
        self.words.insert(0, entry);
        self.persist_words()?;
        Ok(())
    }

    /// 删除词条，同时从已掌握集合中移除该 ID
    ///
    /// ID 不存在时不做任何事并返回 `false`。
    pub fn delete_vocabulary(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.words.len();
        self.words.retain(|w| w.id != id);
        if self.words.len() == before {
            return Ok(false);
        }

        tracing::debug!(id, "deleted vocabulary entry");
        self.persist_words()?;

        if self.learned.remove(id) {
            self.persist_learned()?;
        }
        Ok(true)
    }

    /// 尚未掌握的词条，保持集合顺序
    pub fn words_to_learn(&self) -> Vec<VocabularyEntry> {
        self.words
            .iter()
            .filter(|w| !self.learned.contains(&w.id))
            .cloned()
            .collect()
    }

    // ========== 已掌握 ==========

    pub fn learned_ids(&self) -> &BTreeSet<String> {
        &self.learned
    }

    pub fn is_learned(&self, id: &str) -> bool {
        self.learned.contains(id)
    }

    /// 标记为已掌握（幂等），不校验 ID 是否存在于词汇集合
    ///
    /// 返回是否为新标记。
    pub fn mark_learned(&mut self, id: &str) -> StoreResult<bool> {
        if !self.learned.insert(id.to_string()) {
            return Ok(false);
        }

        self.persist_learned()?;
        Ok(true)
    }

    // ========== 连续学习 ==========

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// 完成一轮学习后计数加一
    pub fn increment_streak(&mut self) -> StoreResult<u32> {
        match self.streak.checked_add(1) {
            Some(next) => self.streak = next,
            None => tracing::warn!(streak = self.streak, "streak counter saturated"),
        }
        self.persist_streak()?;
        Ok(self.streak)
    }

    // ========== 后端 ==========

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn persist_words(&self) -> Result<(), StorageError> {
        write_snapshot(&self.backend, WORDS_KEY, &self.words)
    }

    fn persist_learned(&self) -> Result<(), StorageError> {
        write_snapshot(&self.backend, LEARNED_KEY, &self.learned)
    }

    fn persist_streak(&self) -> Result<(), StorageError> {
        write_snapshot(&self.backend, STREAK_KEY, &self.streak)
    }
}

fn write_snapshot<S, T>(backend: &S, key: &str, data: &T) -> Result<(), StorageError>
where
    S: KeyValueStore,
    T: Serialize,
{
    let raw = snapshot::encode(data)?;
    backend.set(key, &raw)
}

fn log_rewrite(key: &str, result: Result<(), StorageError>) {
    if let Err(err) = result {
        tracing::warn!(key, error = %err, "failed to write initial snapshot");
    }
}

/// 读取并解码一个键，返回 (值, 是否需要按当前格式重写)
fn load_or_default<S, T, F>(backend: &S, key: &str, default: F) -> (T, bool)
where
    S: KeyValueStore,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no persisted snapshot, using default");
            return (default(), true);
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read snapshot, using default");
            return (default(), true);
        }
    };

    match snapshot::decode::<T>(&raw) {
        Ok(snapshot) => {
            let legacy = snapshot.is_legacy();
            if legacy {
                tracing::info!(key, "upgrading legacy snapshot");
            }
            (snapshot.data, legacy)
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding unreadable snapshot");
            (default(), true)
        }
    }
}

// ============================================================
// 测试
// ============================================================
