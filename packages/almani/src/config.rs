use std::path::PathBuf;
use std::time::Duration;

use crate::platform::tts::TtsConfig;
use crate::session::conversation::{PlaybackTiming, DEFAULT_RECORD_DELAY, DEFAULT_REPLY_DELAY};

/// 卡片切换的默认动画延迟
pub const DEFAULT_CARD_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_level: String,
    pub tts: TtsConfig,
    pub playback: PlaybackTiming,
    pub card_advance_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，无法解析的值回退到默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("ALMANI_DB_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let defaults = TtsConfig::default();
        let tts = TtsConfig {
            language: lookup("ALMANI_TTS_LANGUAGE").unwrap_or(defaults.language),
            rate: lookup("ALMANI_TTS_RATE")
                .and_then(|value| value.parse::<f32>().ok())
                .filter(|rate| (0.5..=2.0).contains(rate))
                .unwrap_or(defaults.rate),
            pitch: defaults.pitch,
        };

        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        Self {
            db_path,
            log_level,
            tts,
            playback: PlaybackTiming {
                record_delay: millis("ALMANI_RECORD_DELAY_MS", DEFAULT_RECORD_DELAY),
                reply_delay: millis("ALMANI_REPLY_DELAY_MS", DEFAULT_REPLY_DELAY),
            },
            card_advance_delay: millis("ALMANI_CARD_DELAY_MS", DEFAULT_CARD_DELAY),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("almani")
        .join("almani.db")
}
