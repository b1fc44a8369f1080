use std::path::Path;

use crate::infra::{
    cache::{self, CachePool},
    config::{self, AppConfig},
    database::{self, Database},
    error::AppError,
    logging::{self, LogGuard},
};

/// Handles produced by startup. The caller owns them for the process
/// lifetime and shares the pools with later-spawned workers.
pub struct BootContext {
    pub config: AppConfig,
    pub cache: CachePool,
    pub database: Database,
    pub log_guard: LogGuard,
}

/// Runs the initializers once, sequentially, before any request serving:
/// configuration, logging, cache, database. Any failure propagates to the
/// caller, which owns termination policy.
pub fn bootstrap(config_path: &Path, name: &str, is_daemon: bool) -> Result<BootContext, AppError> {
    let config = config::load(config_path)?;
    let log_guard = logging::init(&config.main, name, is_daemon)?;

    tracing::info!(
        mode = ?config.main.mode,
        zone = %config.main.zone(),
        "configuration loaded"
    );

    let cache = cache::init(&config.redis)?;
    let database = database::init(&config.database, config.main.zone())?;

    tracing::debug!(
        driver = %config.database.driver,
        echo_sql = database.echo_sql,
        "cache and database handles ready"
    );

    Ok(BootContext {
        config,
        cache,
        database,
        log_guard,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::infra::config::RunMode;

    #[test]
    fn fails_before_any_handle_is_built_when_config_is_missing() {
        let result = bootstrap(Path::new("./missing-config.toml"), "svc", false);

        assert!(matches!(result, Err(AppError::ConfigRead { .. })));
    }

    // Installs the process-global log sink, so this is the only test in
    // the binary that drives the full sequence. Runs inside an entered
    // runtime the way the orchestrator does.
    #[test]
    fn builds_context_from_a_valid_config() {
        let runtime = tokio::runtime::Runtime::new().expect("runtime must build");
        let _reactor = runtime.enter();

        let dir = tempfile::tempdir().expect("temp dir must be created");
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            format!(
                r#"[main]
mode = "demo"
log_path = "{}"

[database]
driver = "sqlite"
dsn = "sqlite::memory:"
"#,
                dir.path().join("logs").display()
            ),
        )
        .expect("must write test config");

        let context =
            bootstrap(&config_path, "svc", false).expect("bootstrap must succeed");

        assert_eq!(context.config.main.mode, RunMode::Demo);
        assert!(!context.database.echo_sql);
        assert_eq!(context.cache.state().connections, 0);
        assert!(dir.path().join("logs").is_dir());
    }
}
