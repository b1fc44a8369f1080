mod app;
mod bootstrap;
mod cli;
mod infra;
mod version;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    app::run(cli)
}
