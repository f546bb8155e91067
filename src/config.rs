//! Client configuration. Every field has a default matching the stock game
//! pages, so `{}` (or no config at all) is a valid configuration.

use serde::Deserialize;

use crate::error::Result;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every endpoint path; empty means same origin.
    pub base_url: String,
    pub word_count_id: String,
    pub word_container_id: String,
    pub timer_id: String,
    pub leaderboard_id: String,
    /// How long `update-animation` stays on the count label.
    pub count_flash_ms: u32,
    /// How long `correct-answer` stays on a clicked button.
    pub correct_flash_ms: u32,
    /// Render `/scoresFull` instead of the top-ten `/scores`.
    pub full_leaderboard: bool,
    pub log_level: LogLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            word_count_id: "wordCount".into(),
            word_container_id: "wordContainer".into(),
            timer_id: "timer".into(),
            leaderboard_id: "leaderboard".into(),
            count_flash_ms: 300,
            correct_flash_ms: 500,
            full_leaderboard: false,
            log_level: LogLevel::Info,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Join `base_url` and an endpoint path without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}{path}")
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
