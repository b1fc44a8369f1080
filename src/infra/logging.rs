use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
};

use chrono::Utc;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

use crate::infra::{config::MainConfig, error::AppError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DEFAULT_LEVEL: Level = Level::INFO;

/// Keeps the non-blocking log worker alive. Dropping it flushes pending
/// records and stops the worker, so the caller holds it for the process
/// lifetime.
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Installs the global log sink: stdout unless running detached, plus a
/// timestamped file under `main.log_path` when one is configured.
pub fn init(config: &MainConfig, name: &str, is_daemon: bool) -> Result<LogGuard, AppError> {
    let level = parse_level(&config.log_level);

    let targets = sink_targets(
        is_daemon,
        config.log_path.as_deref(),
        name,
        Utc::now().timestamp(),
    );
    let sinks = open_sinks(&targets)?;
    let (writer, worker) = tracing_appender::non_blocking(Fanout { sinks });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        )
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_owned()))
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    Ok(LogGuard { _worker: worker })
}

/// An unparseable level is tolerated silently and falls back to the
/// default.
fn parse_level(raw: &str) -> Level {
    raw.parse().unwrap_or(DEFAULT_LEVEL)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SinkTarget {
    Stdout,
    File(PathBuf),
}

/// The file name has one-second granularity, so two inits within the same
/// second share a file; records are appended, not clobbered.
fn sink_targets(
    is_daemon: bool,
    log_path: Option<&Path>,
    name: &str,
    now_unix: i64,
) -> Vec<SinkTarget> {
    let mut targets = Vec::new();

    if !is_daemon {
        targets.push(SinkTarget::Stdout);
    }

    if let Some(dir) = log_path {
        targets.push(SinkTarget::File(dir.join(format!("{name}_{now_unix}.log"))));
    }

    targets
}

fn open_sinks(targets: &[SinkTarget]) -> Result<Vec<Box<dyn Write + Send>>, AppError> {
    let mut sinks: Vec<Box<dyn Write + Send>> = Vec::new();

    for target in targets {
        match target {
            SinkTarget::Stdout => sinks.push(Box::new(io::stdout())),
            SinkTarget::File(path) => {
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir).map_err(|source| AppError::LogDirCreate {
                        path: dir.to_path_buf(),
                        source,
                    })?;
                }

                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .mode(0o755)
                    .open(path)
                    .map_err(|source| AppError::LogFileOpen {
                        path: path.clone(),
                        source,
                    })?;
                sinks.push(Box::new(file));
            }
        }
    }

    Ok(sinks)
}

/// Duplicates every record to all sinks. An empty sink list (detached run
/// with no `log_path`) discards records; that mirrors the original
/// behavior and is intentional.
struct Fanout {
    sinks: Vec<Box<dyn Write + Send>>,
}

impl Write for Fanout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }

        Ok(())
    }
}
