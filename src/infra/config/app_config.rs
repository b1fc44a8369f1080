use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub main: MainConfig,
    pub redis: RedisConfig,
    pub database: DatabaseConfig,
}

/// Operational mode, read by downstream code to toggle behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Prod,
    Dev,
    Debug,
    Demo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MainConfig {
    pub mode: RunMode,
    pub time_zone: String,
    pub log_level: String,
    pub log_path: Option<PathBuf>,
}

impl MainConfig {
    /// Parses `time_zone` as an IANA zone name. Unknown names fall back to
    /// UTC rather than failing startup.
    pub fn zone(&self) -> Tz {
        self.time_zone.parse().unwrap_or(Tz::UTC)
    }
}

impl Default for MainConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Prod,
            time_zone: "UTC".to_owned(),
            log_level: "info".to_owned(),
            log_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedisConfig {
    /// Server address as `host:port`; IPv6 literals use `[addr]:port` or
    /// the bare `addr` form.
    pub host: String,
    pub password: String,
    pub db: i64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1:6379".to_owned(),
            password: String::new(),
            db: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub driver: String,
    pub dsn: String,
    pub show_sql: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: "sqlite".to_owned(),
            dsn: "sqlite://appinit.db".to_owned(),
            show_sql: false,
        }
    }
}
