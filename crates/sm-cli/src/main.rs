//! schema-migrate CLI - brings a blog database schema up to the application version

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{checksum, migrate, script, split, status};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
        cli::Commands::Script(args) => script::execute(args, &cli.global),
        cli::Commands::Split(args) => split::execute(args, &cli.global),
        cli::Commands::Checksum(args) => checksum::execute(args, &cli.global),
    }
}
