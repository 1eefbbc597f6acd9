//! Cooperative auto-advance timer.
//!
//! Ticks are just commands into the session loop, so autoplay and manual
//! navigation share one serialized entry point and can never overlap a queue
//! mutation.

use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::Command;

/// Owns at most one live timer task per session.
pub struct Autoplay {
    commands: Sender<Command>,
    cancel: Option<CancellationToken>,
}

impl Autoplay {
    #[must_use]
    pub fn new(commands: Sender<Command>) -> Self {
        Self {
            commands,
            cancel: None,
        }
    }

    /// Arm the periodic timer, cancelling any live one first. A zero period
    /// means autoplay is disabled and nothing is armed. A period change takes
    /// effect only through a fresh `start`.
    pub fn start(&mut self, period: Duration) {
        self.stop();
        if period.is_zero() {
            info!("autoplay disabled (zero period)");
            return;
        }
        let cancel = CancellationToken::new();
        self.cancel = Some(cancel.clone());
        let commands = self.commands.clone();
        info!(period = %humantime::format_duration(period), "autoplay armed");
        tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick fires immediately; swallow it so the
            // current image holds for a full period.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if commands.send(Command::Tick).await.is_err() {
                            debug!("session command channel closed; autoplay exiting");
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Cancel any live timer. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.stop();
    }
}
