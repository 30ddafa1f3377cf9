//! SQLite 本地键值存储模块
//!
//! 提供学习者状态的持久化能力：
//! - 固定命名空间下的三个键，每个键保存一个集合的 JSON 文本
//! - schema 版本迁移
//! - 集合快照的版本化编码（见 [`snapshot`]）

// ============================================================
// 子模块声明
// ============================================================

pub mod migrations;
pub mod snapshot;

// ============================================================
// 重新导出主要类型
// ============================================================

pub use migrations::run_migrations;
pub use snapshot::{LEARNED_KEY, STREAK_KEY, WORDS_KEY};

// ============================================================
// 依赖导入
// ============================================================

use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

// ============================================================
// 错误类型定义
// ============================================================

/// 存储模块错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("迁移错误: {0}")]
    Migration(String),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("锁获取失败: {0}")]
    LockError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

// ============================================================
// KeyValueStore - 持久化后端抽象
// ============================================================

/// 持久化键值后端
///
/// 写入是同步的，返回即表示已落盘（对 SQLite 而言）。
pub trait KeyValueStore {
    /// 读取键值，键不存在时返回 `None`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// 插入或覆盖键值
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// 删除键，返回是否删除了记录
    fn remove(&self, key: &str) -> StorageResult<bool>;
}

// ============================================================
// SqliteStore - SQLite 键值后端
// ============================================================

/// SQLite 键值后端
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
}

impl SqliteStore {
    /// 打开（或创建）数据库文件
    ///
    /// 自动创建父目录、启用 WAL 模式，并运行数据库迁移。
    ///
    /// # Example
    /// ```ignore
    /// let store = SqliteStore::open("./data/almani.db")?;
    /// ```
    pub fn open<P: AsRef<Path>>(db_path: P) -> StorageResult<Self> {
        let path = db_path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let connection = Connection::open(path)?;

        // 启用 WAL 模式以提高写入性能
        connection.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;",
        )?;

        let store = Self {
            conn: Arc::new(Mutex::new(connection)),
            db_path: path.to_string_lossy().to_string(),
        };
        store.initialize()?;

        Ok(store)
    }

    /// 创建内存数据库（用于测试）
    pub fn in_memory() -> StorageResult<Self> {
        let connection = Connection::open_in_memory()?;

        let store = Self {
            conn: Arc::new(Mutex::new(connection)),
            db_path: ":memory:".to_string(),
        };
        store.initialize()?;

        Ok(store)
    }

    /// 初始化数据库（运行迁移）
    fn initialize(&self) -> StorageResult<()> {
        let conn = self.get_conn()?;
        migrations::run_migrations(&conn)?;
        Ok(())
    }

    /// 获取连接锁
    fn get_conn(&self) -> StorageResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::LockError(e.to_string()))
    }

    /// 获取数据库路径
    pub fn db_path(&self) -> &str {
        &self.db_path
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))",
            params![key, value],
        )?;

        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }
}

// ============================================================
// MemoryStore - 内存键值后端
// ============================================================

/// 内存键值后端
///
/// 克隆出的句柄共享同一份数据，可用来模拟进程重启后重新加载。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_entries(&self) -> StorageResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| StorageError::LockError(e.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.get_entries()?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get_entries()?.remove(key).is_some())
    }
}

// ============================================================
// 测试
// ============================================================
