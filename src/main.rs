//! Binary entrypoint for album-frame.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use album_frame::config;
use album_frame::events::{Command, ViewerEvent};
use album_frame::session;

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "album-frame", about = "Sliding-window album slideshow client")]
struct Cli {
    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Extra endpoint candidate, highest priority first (repeatable)
    #[arg(short = 'e', long = "endpoint", value_name = "URL")]
    endpoints: Vec<String>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("album_frame={level}").parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut cfg = config::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    // CLI candidates outrank the persisted list.
    if !cli.endpoints.is_empty() {
        let persisted = std::mem::take(&mut cfg.endpoints);
        cfg.endpoints = cli.endpoints.into_iter().chain(persisted).collect();
    }
    cfg.validate().context("validating configuration")?;
    info!(
        candidates = cfg.endpoints.len(),
        period = %humantime::format_duration(cfg.refresh_period()),
        initialized = cfg.initialized,
        "starting album-frame"
    );

    let (command_tx, command_rx) = mpsc::channel::<Command>(32);
    let (viewer_tx, mut viewer_rx) = mpsc::channel::<ViewerEvent>(32);
    let cancel = CancellationToken::new();

    // Stand-in rendering layer: log what a real viewer would draw.
    tokio::spawn(async move {
        while let Some(event) = viewer_rx.recv().await {
            match event {
                ViewerEvent::NeedsSetup => info!("viewer: needs first-run setup"),
                ViewerEvent::Loading => info!("viewer: loading"),
                ViewerEvent::Frame(frame) => match frame.payload {
                    Some(payload) => info!(
                        slot = ?frame.slot_id,
                        bytes = payload.len(),
                        content_type = frame.content_type.as_deref().unwrap_or("unknown"),
                        direction = ?frame.direction,
                        "viewer: show image"
                    ),
                    None => info!(
                        slot = ?frame.slot_id,
                        direction = ?frame.direction,
                        "viewer: no image available"
                    ),
                },
            }
        }
    });

    // Manual navigation on stdin: `n` advances, `p` steps back.
    tokio::spawn({
        let commands = command_tx.clone();
        async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let cmd = match line.trim() {
                    "n" | "next" => Some(Command::Next),
                    "p" | "prev" => Some(Command::Prev),
                    _ => None,
                };
                if let Some(cmd) = cmd {
                    if commands.send(cmd).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("ctrl-c received; shutting down");
                cancel.cancel();
            }
        }
    });

    session::run(cfg, cli.config, command_tx, command_rx, viewer_tx, cancel).await
}
