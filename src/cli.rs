// src/cli.rs
// CLI commands for lookrate

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::sleep;

use crate::analysis::{AnalysisMode, GeminiAnalyzer, ImageAnalyzer};
use crate::config::CONFIG;
use crate::format::AnalysisReport;
use crate::image;
use crate::progress::ProgressTicker;
use crate::relay::TelegramRelay;
use crate::server;
use crate::session::{ANALYSIS_FAILED_NOTICE, AnalysisSession};
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "lookrate")]
#[command(about = "AI photo rating with Telegram forwarding")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Bind host (default: LOOKRATE_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (default: LOOKRATE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Rate a photo from the command line
    Analyze {
        /// Path to the image file
        image: PathBuf,

        /// Rating mode: face or current-look
        #[arg(long, default_value = "face")]
        mode: AnalysisMode,

        /// Skip the Telegram forward
        #[arg(long)]
        no_relay: bool,
    },
}

/// Run the HTTP server, with CLI flags overriding the configured bind.
pub async fn run_serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_env()?);
    let bind = format!(
        "{}:{}",
        host.as_deref().unwrap_or(&CONFIG.host),
        port.unwrap_or(CONFIG.port)
    );

    server::serve(state, &bind).await
}

/// Rate one photo and print the result, forwarding to Telegram unless
/// `--no-relay` was given.
pub async fn run_analyze(path: PathBuf, mode: AnalysisMode, no_relay: bool) -> anyhow::Result<()> {
    let encoded = image::read_image(&path).await?;
    let analyzer = GeminiAnalyzer::from_env()?;
    let relay = if no_relay {
        None
    } else {
        let relay = TelegramRelay::from_env();
        if relay.is_none() {
            eprintln!("Telegram relay disabled (TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID not set).");
        }
        relay
    };

    let mut session = AnalysisSession::new(encoded, mode);
    println!("Rating {} ({} mode)...", path.display(), mode);

    let bar = rating_bar();
    let mut ticker = ProgressTicker::new();
    bar.set_position(ticker.percent() as u64);

    // Drive the cosmetic ticker while the real work runs.
    let outcome = {
        let analyze = analyzer.analyze(&session.image, mode);
        tokio::pin!(analyze);
        loop {
            tokio::select! {
                result = &mut analyze => break result,
                _ = sleep(ProgressTicker::TICK_INTERVAL) => {
                    bar.set_position(ticker.tick() as u64);
                }
            }
        }
    };

    let text = match outcome {
        Ok(text) => {
            ticker.complete();
            bar.set_position(ticker.percent() as u64);
            sleep(ProgressTicker::HIDE_DELAY).await;
            ticker.hide();
            bar.finish_and_clear();
            text
        }
        Err(err) => {
            // Frozen where it stopped, matching the failed-run contract.
            ticker.hide();
            bar.abandon();
            if let Some(relay) = &relay {
                eprintln!("{ANALYSIS_FAILED_NOTICE}");
                forward(relay, &session).await;
            }
            return Err(err.into());
        }
    };

    session.set_commentary(text.as_str());
    let report = AnalysisReport::from_text(text);

    println!("\n{}\n", report.stars);
    println!("{}", report.text);

    if let Some(relay) = &relay {
        forward(relay, &session).await;
    }

    Ok(())
}

async fn forward(relay: &TelegramRelay, session: &AnalysisSession) {
    if relay.forward(&session.image, session.relay_message()).await {
        println!("Forwarded to Telegram.");
    } else {
        eprintln!("Telegram forward incomplete (see logs).");
    }
}

fn rating_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}%")
        .unwrap_or_else(|e| {
            eprintln!("Failed to create progress bar template: {}", e);
            ProgressStyle::default_bar()
        })
        .progress_chars("=>-");
    bar.set_style(style);
    bar.set_message("Analyzing".to_string());
    bar
}
