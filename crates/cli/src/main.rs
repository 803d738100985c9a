//! tagtree CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    init_logging(log_level)?;

    // Execute command
    match cli.command {
        Commands::Validate(args) => commands::validate::execute(args, cli.config).await,
        Commands::Export(args) => commands::export::execute(args, cli.config).await,
        Commands::Tree(args) => commands::tree::execute(args, cli.config).await,
        Commands::Search(args) => commands::search::execute(args, cli.config).await,
        Commands::Normalize(args) => commands::normalize::execute(args, cli.config).await,
        Commands::New(args) => commands::new::execute(args, cli.config).await,
        Commands::Add(args) => commands::add::execute(args, cli.config).await,
        Commands::Config(args) => commands::config::execute(args, cli.config).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
