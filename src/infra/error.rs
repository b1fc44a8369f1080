use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to create log directory {path}: {source}")]
    LogDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open log file {path}: {source}")]
    LogFileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("failed to build cache client: {0}")]
    CacheInit(#[source] bb8_redis::redis::RedisError),
    #[error("unsupported database driver {driver:?}")]
    DatabaseDriver { driver: String },
    #[error("database dsn does not match driver {driver:?}")]
    DatabaseDsnMismatch { driver: String },
    #[error("failed to parse database dsn: {0}")]
    DatabaseDsn(#[source] sqlx::Error),
    #[error("pid file {path} is locked by another process")]
    PidFileLocked { path: PathBuf },
    #[error("failed to open pid file {path}: {source}")]
    PidFileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write pid file {path}: {source}")]
    PidFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open daemon log file {path}: {source}")]
    DaemonLogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to detach from terminal: {0}")]
    DaemonDetach(#[source] daemonize_me::DaemonError),
}
