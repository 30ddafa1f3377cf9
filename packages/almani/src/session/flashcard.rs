//! 单词卡学习会话
//!
//! 按顺序遍历构造时尚未掌握的词条：
//!
//! ```text
//! Active --(Known: 标记已掌握)--> Active | Complete
//! Active --(NotYet)-----------> Active | Complete
//! ```
//!
//! 进入 Complete 时连续学习计数加一，每个会话只加一次。
//! 会话状态只在本次学习期间存在，不持久化。

use crate::models::VocabularyEntry;
use crate::storage::KeyValueStore;
use crate::store::{LearnerStore, StoreResult};

/// 用户对当前卡片的回答
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// 认识
    Known,
    /// 还不认识
    NotYet,
}

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 构造时已没有待学习的词
    AllLearned,
    Active,
    Complete,
}

#[derive(Debug, Clone)]
pub struct FlashcardSession {
    cards: Vec<VocabularyEntry>,
    index: usize,
    flipped: bool,
    complete: bool,
}

impl FlashcardSession {
    pub fn new(cards: Vec<VocabularyEntry>) -> Self {
        Self {
            cards,
            index: 0,
            flipped: false,
            complete: false,
        }
    }

    /// 以存储中尚未掌握的词构造会话
    pub fn from_store<S: KeyValueStore>(store: &LearnerStore<S>) -> Self {
        Self::new(store.words_to_learn())
    }

    pub fn state(&self) -> SessionState {
        if self.complete {
            SessionState::Complete
        } else if self.cards.is_empty() {
            SessionState::AllLearned
        } else {
            SessionState::Active
        }
    }

    /// 当前卡片，会话未进行时为 `None`
    pub fn current(&self) -> Option<&VocabularyEntry> {
        match self.state() {
            SessionState::Active => self.cards.get(self.index),
            _ => None,
        }
    }

    /// 翻转卡片（显示/隐藏释义）
    pub fn flip(&mut self) {
        if self.state() == SessionState::Active {
            self.flipped = !self.flipped;
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// 进度 (当前位置, 总数)，位置从 1 开始
    pub fn progress(&self) -> (usize, usize) {
        let total = self.cards.len();
        let position = if self.complete {
            total
        } else {
            (self.index + 1).min(total)
        };
        (position, total)
    }

    /// 回答当前卡片并前进
    ///
    /// 会话不处于 Active 时不做任何事。
    pub fn answer<S: KeyValueStore>(
        &mut self,
        answer: Answer,
        store: &mut LearnerStore<S>,
    ) -> StoreResult<SessionState> {
        let Some(card) = self.current() else {
            return Ok(self.state());
        };

        if answer == Answer::Known {
            let id = card.id.clone();
            store.mark_learned(&id)?;
        }

        self.flipped = false;

        if self.index + 1 < self.cards.len() {
            self.index += 1;
        } else {
            self.complete = true;
            let streak = store.increment_streak()?;
            tracing::info!(cards = self.cards.len(), streak, "flashcard session complete");
        }

        Ok(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;
    use crate::storage::MemoryStore;

    fn bundled_store() -> LearnerStore<MemoryStore> {
        let data = ReferenceData::bundled().unwrap();
        LearnerStore::initialize(MemoryStore::new(), data.daily_words())
    }

    #[test]
    fn test_empty_session_is_all_learned() {
        let mut store = LearnerStore::initialize(MemoryStore::new(), &[]);
        let mut session = FlashcardSession::from_store(&store);

        assert_eq!(session.state(), SessionState::AllLearned);
        assert!(session.current().is_none());
        assert_eq!(
            session.answer(Answer::Known, &mut store).unwrap(),
            SessionState::AllLearned
        );
        assert_eq!(store.streak(), 0);
    }

    #[test]
    fn test_known_marks_and_flip_resets() {
        let mut store = bundled_store();
        let mut session = FlashcardSession::from_store(&store);

        session.flip();
        assert!(session.is_flipped());
        assert_eq!(session.current().unwrap().id, "w1");

        session.answer(Answer::Known, &mut store).unwrap();
        assert!(store.is_learned("w1"));
        assert!(!session.is_flipped());
        assert_eq!(session.current().unwrap().id, "w2");
        assert_eq!(session.progress(), (2, 10));

        session.answer(Answer::NotYet, &mut store).unwrap();
        assert!(!store.is_learned("w2"));
    }

    #[test]
    fn test_streak_increments_once() {
        let mut store = bundled_store();
        let mut session = FlashcardSession::from_store(&store);

        for _ in 0..10 {
            session.answer(Answer::NotYet, &mut store).unwrap();
        }
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.progress(), (10, 10));
        assert_eq!(store.streak(), 1);

        // 完成后继续回答不再计数
        session.answer(Answer::Known, &mut store).unwrap();
        assert_eq!(store.streak(), 1);
        assert!(store.learned_ids().is_empty());
    }
}
