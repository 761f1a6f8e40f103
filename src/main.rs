// src/main.rs
// lookrate - AI photo rating service

use anyhow::Result;
use clap::Parser;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use lookrate::cli::{self, Cli, Commands};
use lookrate::config::CONFIG;

#[tokio::main]
async fn main() -> Result<()> {
    // Dereferencing CONFIG here loads .env before anything else reads the
    // environment.
    let level = Level::from_str(&CONFIG.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        None => cli::run_serve(None, None).await?,
        Some(Commands::Serve { host, port }) => cli::run_serve(host, port).await?,
        Some(Commands::Analyze {
            image,
            mode,
            no_relay,
        }) => cli::run_analyze(image, mode, no_relay).await?,
    }

    Ok(())
}
