mod cli;
mod commands;


use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    // RUST_LOG controls the level, warnings only by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Command::ToTs(args) => commands::to_ts::run(args.into()),
        Command::FromTs(args) => commands::from_ts::run(args.into()),
    }
}
