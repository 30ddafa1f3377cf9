//! 集合快照编码
//!
//! 每个持久化键保存一个版本化信封：
//!
//! ```text
//! {"version": 1, "data": <集合内容>}
//! ```
//!
//! 解码规则：
//! - `version == SNAPSHOT_VERSION` 的信封：正常解码
//! - 不带信封的裸 JSON（旧格式，视为版本 0）：按旧格式解码，下次写入时升级为信封
//! - 其他版本号或无法解析的文本：返回错误，由调用方替换为默认值

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::storage::StorageResult;

/// 词汇集合键
pub const WORDS_KEY: &str = "german_app_words";
/// 已掌握 ID 集合键
pub const LEARNED_KEY: &str = "german_app_learned";
/// 连续学习计数键
pub const STREAK_KEY: &str = "german_app_streak";

/// 当前快照格式版本
pub const SNAPSHOT_VERSION: u32 = 1;

/// 旧格式（无信封）对应的版本号
pub const LEGACY_VERSION: u32 = 0;

/// 快照解码错误
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("快照格式错误: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("不支持的快照版本: {0}")]
    UnsupportedVersion(u64),
}

/// 解码后的快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    pub data: T,
    /// 解码时识别出的格式版本
    pub version: u32,
}

impl<T> Snapshot<T> {
    /// 是否为需要升级的旧格式
    pub fn is_legacy(&self) -> bool {
        self.version == LEGACY_VERSION
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct RawEnvelope {
    version: u64,
    data: Value,
}

/// 编码为当前版本的信封
pub fn encode<T: Serialize>(data: &T) -> StorageResult<String> {
    let envelope = EnvelopeRef {
        version: SNAPSHOT_VERSION,
        data,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// 解码信封或旧格式
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<Snapshot<T>, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;

    if is_envelope(&value) {
        let envelope: RawEnvelope = serde_json::from_value(value)?;
        if envelope.version != u64::from(SNAPSHOT_VERSION) {
            return Err(SnapshotError::UnsupportedVersion(envelope.version));
        }
        let data = serde_json::from_value(envelope.data)?;
        return Ok(Snapshot {
            data,
            version: SNAPSHOT_VERSION,
        });
    }

    let data = serde_json::from_value(value)?;
    Ok(Snapshot {
        data,
        version: LEGACY_VERSION,
    })
}

fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .map(|obj| obj.contains_key("version") && obj.contains_key("data"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_encode_wraps_payload() {
        let raw = encode(&7u32).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["data"], 7);
    }

    #[test]
    fn test_decode_current_version() {
        let set: BTreeSet<String> = ["w1".to_string(), "w2".to_string()].into();
        let raw = encode(&set).unwrap();

        let snapshot: Snapshot<BTreeSet<String>> = decode(&raw).unwrap();
        assert_eq!(snapshot.data, set);
        assert!(!snapshot.is_legacy());
    }

    #[test]
    fn test_decode_legacy_streak_text() {
        // 旧格式直接保存数字的文本表示
        let snapshot: Snapshot<u32> = decode("12").unwrap();
        assert_eq!(snapshot.data, 12);
        assert!(snapshot.is_legacy());
    }

    #[test]
    fn test_decode_legacy_learned_array() {
        let snapshot: Snapshot<BTreeSet<String>> = decode(r#"["w3","w1","w3"]"#).unwrap();
        assert_eq!(snapshot.data.len(), 2);
        assert_eq!(snapshot.version, LEGACY_VERSION);
    }

    #[test]
    fn test_decode_unknown_version() {
        let result: Result<Snapshot<u32>, _> = decode(r#"{"version": 9, "data": 1}"#);
        assert!(matches!(result, Err(SnapshotError::UnsupportedVersion(9))));
    }

    #[test]
    fn test_decode_malformed() {
        assert!(decode::<u32>("not json").is_err());
        assert!(decode::<u32>("-3").is_err());
        assert!(decode::<Vec<String>>(r#"{"version": 1, "data": 5}"#).is_err());
    }
}
