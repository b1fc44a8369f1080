use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "appinit", about = "Service bootstrap (config, logs, cache, database)")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Service name, used as the log file prefix
    #[arg(short, long, default_value = "appinit")]
    pub name: String,

    /// Detach from the terminal and run in the background
    #[arg(short, long)]
    pub daemon: bool,

    /// PID file written when running as a daemon
    #[arg(long, default_value = "appinit.pid")]
    pub pid_file: PathBuf,

    /// File the daemon's stdout/stderr are redirected to
    #[arg(long, default_value = "appinit.log")]
    pub log_file: PathBuf,

    /// Print build metadata and exit
    #[arg(short = 'V', long)]
    pub version: bool,
}
