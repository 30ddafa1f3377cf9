//! Almani - 面向阿拉伯语母语者的德语词汇学习
//!
//! 核心是 [`store::LearnerStore`]：词汇集合、已掌握集合与连续学习计数的内存状态，
//! 每次修改后同步写回键值存储。其余模块是围绕它的只读数据与页面级会话。

pub mod config;
pub mod dashboard;
pub mod dictionary;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod platform;
pub mod reference;
pub mod session;
pub mod storage;
pub mod store;

pub use models::{Level, VocabularyEntry};
pub use reference::ReferenceData;
pub use store::{LearnerStore, StoreError, StoreResult};
