//! Application flow control: endpoint resolution, cold start, and the
//! serialized command loop driving the queue.

use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::autoplay::Autoplay;
use crate::config::{self, Configuration};
use crate::endpoint;
use crate::events::{Command, FrameUpdate, ViewerEvent};
use crate::fetch::{HttpImageSource, ImageFetcher};
use crate::queue::{QUEUE_SIZE, SlideQueue};

/// Wire the HTTP stack and run a session until `cancel` fires.
///
/// The endpoint is resolved exactly once here; later fetch failures are
/// recovered per-slot and never trigger a re-resolution.
pub async fn run(
    config: Configuration,
    config_path: PathBuf,
    commands: Sender<Command>,
    commands_rx: Receiver<Command>,
    viewer: Sender<ViewerEvent>,
    cancel: CancellationToken,
) -> Result<()> {
    // Image fetches carry no caller-imposed timeout; only the startup probe
    // (inside `endpoint::resolve`) is bounded.
    let client = Client::builder().build().context("building HTTP client")?;
    let base = endpoint::resolve(&client, &config.endpoints, config.probe_timeout).await;
    let fetcher = HttpImageSource::new(client, base);
    let session = Session::new(config, Some(config_path), fetcher, commands, viewer);
    session.run(commands_rx, cancel).await
}

/// Per-session state: configuration, the sliding window, and the autoplay
/// timer. Created at startup, torn down (drain and release) on exit.
pub struct Session<F: ImageFetcher> {
    config: Configuration,
    config_path: Option<PathBuf>,
    fetcher: F,
    queue: SlideQueue,
    autoplay: Autoplay,
    commands: Sender<Command>,
    viewer: Sender<ViewerEvent>,
}

impl<F: ImageFetcher> Session<F> {
    pub fn new(
        config: Configuration,
        config_path: Option<PathBuf>,
        fetcher: F,
        commands: Sender<Command>,
        viewer: Sender<ViewerEvent>,
    ) -> Self {
        let autoplay = Autoplay::new(commands.clone());
        Self {
            config,
            config_path,
            fetcher,
            queue: SlideQueue::new(),
            autoplay,
            commands,
            viewer,
        }
    }

    /// Serialized entry point for ticks and navigation: each command is
    /// handled to completion before the next is taken, so queue mutations
    /// never overlap an in-flight advance.
    pub async fn run(
        mut self,
        mut commands_rx: Receiver<Command>,
        cancel: CancellationToken,
    ) -> Result<()> {
        self.start_flow().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("cancel received; tearing down session");
                    break;
                }
                maybe_cmd = commands_rx.recv() => {
                    let Some(cmd) = maybe_cmd else { break };
                    self.handle(cmd).await;
                }
            }
        }
        self.autoplay.stop();
        self.queue.drain();
        Ok(())
    }

    async fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Tick | Command::Next => {
                if !self.config.initialized {
                    return;
                }
                self.queue.advance(&self.fetcher).await;
                self.publish_frame().await;
            }
            Command::Prev => {
                if !self.config.initialized {
                    return;
                }
                if self.queue.retreat() {
                    self.publish_frame().await;
                }
            }
            Command::Backfill => {
                let appended = self.queue.fill(&self.fetcher, QUEUE_SIZE - 1).await;
                info!(appended, len = self.queue.len(), "background fill complete");
                self.publish_frame().await;
            }
            Command::Configure(update) => {
                update.apply(&mut self.config);
                if let Some(path) = &self.config_path {
                    if let Err(err) = config::save_yaml_file(&self.config, path) {
                        warn!(error = %err, "failed to persist configuration");
                    }
                }
                info!("configuration updated; restarting flow");
                self.start_flow().await;
            }
        }
    }

    /// Startup order: setup gate, drain, minimal fill, first frame on screen,
    /// background fill, autoplay.
    #[instrument(skip(self))]
    async fn start_flow(&mut self) {
        if !self.config.initialized {
            info!("first-run setup incomplete; awaiting configuration");
            self.autoplay.stop();
            let _ = self.viewer.send(ViewerEvent::NeedsSetup).await;
            return;
        }
        let _ = self.viewer.send(ViewerEvent::Loading).await;
        self.queue.drain();
        self.queue.fill(&self.fetcher, 1).await;
        // First image is on screen; the rest of the window fills behind it.
        self.publish_frame().await;
        if self.commands.try_send(Command::Backfill).is_err() {
            warn!("command channel full; skipping background fill");
        }
        self.autoplay.start(self.config.refresh_period());
    }

    async fn publish_frame(&mut self) {
        let update = FrameUpdate {
            slot_id: self.queue.current_slot().map(|slot| slot.id),
            payload: self.queue.current_payload(),
            content_type: self
                .queue
                .current_slot()
                .and_then(|slot| slot.content_type.clone()),
            direction: self.queue.last_direction(),
        };
        let _ = self.viewer.send(ViewerEvent::Frame(update)).await;
    }
}
