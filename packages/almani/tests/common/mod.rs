#![allow(dead_code)]

use almani::models::{Level, VocabularyEntry};
use almani::reference::ReferenceData;
use almani::storage::MemoryStore;
use almani::store::LearnerStore;

pub fn bundled_words() -> Vec<VocabularyEntry> {
    ReferenceData::bundled()
        .expect("bundled data must parse")
        .daily_words()
        .to_vec()
}

/// 以内置词表初始化的内存存储，返回存储和共享的后端句柄
pub fn bundled_store() -> (LearnerStore<MemoryStore>, MemoryStore) {
    let backend = MemoryStore::new();
    let store = LearnerStore::initialize(backend.clone(), &bundled_words());
    (store, backend)
}

/// 模拟进程重启：用同一后端重新初始化
pub fn restart(backend: &MemoryStore) -> LearnerStore<MemoryStore> {
    LearnerStore::initialize(backend.clone(), &bundled_words())
}

pub fn word(id: &str, german: &str) -> VocabularyEntry {
    VocabularyEntry {
        id: id.to_string(),
        german: german.to_string(),
        arabic: "كلمة".to_string(),
        english: "word".to_string(),
        example: String::new(),
        level: Level::A1,
        category: "General".to_string(),
    }
}
