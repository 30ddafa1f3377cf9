//! 页面级临时会话
//!
//! 每次进入页面时新建，离开即丢弃，不进入持久化数据模型。

pub mod conversation;
pub mod flashcard;

pub use conversation::{ConversationPlayback, Message, PlaybackTiming, Sender, TurnOutcome};
pub use flashcard::{Answer, FlashcardSession, SessionState};
