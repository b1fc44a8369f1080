use anyhow::{Context, Result};

use crate::{
    bootstrap,
    cli::Cli,
    infra::daemon::{self, DaemonContext},
    version,
};

/// Orchestrates startup. Termination policy is centralized here: any
/// initializer failure propagates to `main`, which exits non-zero.
pub fn run(cli: Cli) -> Result<()> {
    if cli.version {
        version::show();
        return Ok(());
    }

    let pid_lock = if cli.daemon {
        // After this call we are the detached child; the parent exited
        // inside detach.
        let context = DaemonContext::new(cli.pid_file.clone(), cli.log_file.clone());
        Some(daemon::detach(&context)?)
    } else {
        None
    };

    // The pool constructors schedule background work on the Tokio reactor.
    // The runtime is created after the optional fork: worker threads do not
    // survive a fork, so it must not exist before detach returns.
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let _reactor = runtime.enter();

    let context = bootstrap::bootstrap(&cli.config, &cli.name, cli.daemon)?;

    if let Some(lock) = &pid_lock {
        tracing::info!(pid_file = %lock.path().display(), "running detached");
    }

    tracing::info!(
        mode = ?context.config.main.mode,
        name = %cli.name,
        "bootstrap complete; handles ready"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn cli(version: bool, config: &str) -> Cli {
        Cli {
            config: PathBuf::from(config),
            name: "svc".to_owned(),
            daemon: false,
            pid_file: PathBuf::from("svc.pid"),
            log_file: PathBuf::from("svc.log"),
            version,
        }
    }

    #[test]
    fn version_flag_short_circuits_bootstrap() {
        run(cli(true, "./missing-config.toml")).expect("version report must succeed");
    }

    #[test]
    fn missing_config_is_a_reported_error() {
        let result = run(cli(false, "./missing-config.toml"));

        assert!(result.is_err());
    }
}
