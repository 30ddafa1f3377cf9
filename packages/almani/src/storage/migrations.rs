//! 数据库迁移模块
//!
//! 管理 SQLite 数据库的版本迁移，确保表结构与应用版本保持一致。
//!
//! ## 迁移策略
//! - 每个迁移在独立事务中执行
//! - 迁移记录存储在 schema_migrations 表中
//! - 集合内容本身的格式版本由 [`super::snapshot`] 负责，与表结构版本无关

use rusqlite::Connection;

use crate::storage::{StorageError, StorageResult};

/// 当前数据库 schema 版本
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// 初始化 schema SQL (V1)
const INIT_SCHEMA: &str = include_str!("schema.sql");

/// 迁移定义
#[derive(Debug, Clone)]
pub struct Migration {
    /// 迁移版本号
    pub version: i32,
    /// 迁移名称/描述
    pub name: String,
    /// 迁移 SQL 语句
    pub sql: String,
}

impl Migration {
    pub fn new(version: i32, name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            version,
            name: name.into(),
            sql: sql.into(),
        }
    }
}

/// 获取所有迁移定义（按版本号排序）
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration::new(1, "键值表", INIT_SCHEMA)]
}

/// 确保迁移表存在
fn ensure_migrations_table(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at INTEGER NOT NULL
        );
        "#,
    )
    .map_err(|e| StorageError::Migration(format!("创建迁移表失败: {}", e)))?;

    Ok(())
}

/// 获取当前数据库版本，没有迁移记录时返回 0
pub fn get_current_version(conn: &Connection) -> i32 {
    if ensure_migrations_table(conn).is_err() {
        return 0;
    }

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

/// 获取已应用的迁移版本列表
fn get_applied_versions(conn: &Connection) -> StorageResult<Vec<i32>> {
    ensure_migrations_table(conn)?;

    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<i32>, _>>()?;

    Ok(versions)
}

/// 记录迁移已应用
fn record_migration(conn: &Connection, migration: &Migration) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            migration.version,
            migration.name,
            chrono::Utc::now().timestamp()
        ],
    )?;

    Ok(())
}

/// 运行数据库迁移
///
/// 检查当前数据库版本并执行尚未应用的迁移。
/// 每个迁移在独立事务中执行，失败时回滚该迁移并返回错误。
///
/// # Returns
/// * `Result<i32, StorageError>` - 成功返回最终版本号
pub fn run_migrations(conn: &Connection) -> Result<i32, StorageError> {
    ensure_migrations_table(conn)?;

    let applied_versions = get_applied_versions(conn)?;
    let mut final_version = get_current_version(conn);

    if final_version > CURRENT_SCHEMA_VERSION {
        tracing::warn!(
            found = final_version,
            supported = CURRENT_SCHEMA_VERSION,
            "database schema is newer than this build"
        );
    }

    for migration in get_migrations() {
        if applied_versions.contains(&migration.version) {
            continue;
        }

        tracing::info!(version = migration.version, name = %migration.name, "running migration");

        match execute_migration_in_transaction(conn, &migration) {
            Ok(()) => {
                final_version = migration.version;
            }
            Err(e) => {
                tracing::error!(version = migration.version, error = %e, "migration failed");
                return Err(e);
            }
        }
    }

    tracing::debug!(version = final_version, "database schema up to date");
    Ok(final_version)
}

/// 在事务中执行单个迁移
fn execute_migration_in_transaction(conn: &Connection, migration: &Migration) -> StorageResult<()> {
    conn.execute_batch("BEGIN IMMEDIATE")?;

    match conn.execute_batch(&migration.sql) {
        Ok(()) => {
            if let Err(e) = record_migration(conn, migration) {
                conn.execute_batch("ROLLBACK").ok();
                return Err(e);
            }

            conn.execute_batch("COMMIT")?;
            Ok(())
        }
        Err(e) => {
            conn.execute_batch("ROLLBACK").ok();
            Err(StorageError::Migration(format!(
                "迁移 v{} 执行失败: {}",
                migration.version, e
            )))
        }
    }
}

/// 迁移记录
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    pub version: i32,
    pub name: String,
    pub applied_at: i64,
}

/// 获取迁移历史
pub fn get_migration_history(conn: &Connection) -> StorageResult<Vec<MigrationRecord>> {
    ensure_migrations_table(conn)?;

    let mut stmt =
        conn.prepare("SELECT version, name, applied_at FROM schema_migrations ORDER BY version")?;

    let records = stmt
        .query_map([], |row| {
            Ok(MigrationRecord {
                version: row.get(0)?,
                name: row.get(1)?,
                applied_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}
