//! Periodic effect ticker.
//!
//! Every interval the ticker lists the characters in combat and spawns one
//! tick per character. Ticks for different characters run in parallel; a
//! tick that overlaps a still-running tick for the same character is skipped
//! by [`CombatService::tick_character`].

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::service::{CombatService, TickResult};

pub struct EffectTicker {
    service: Weak<CombatService>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

/// Owner side of a spawned ticker.
pub struct TickerHandle {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl TickerHandle {
    /// Signal the ticker to stop and wait for the loop to exit.
    ///
    /// Ticks already spawned for individual characters are left to finish.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        let _ = self.shutdown.send(true);
        self.join.await
    }
}

impl EffectTicker {
    /// Spawn a ticker for `service` on the current runtime.
    ///
    /// The ticker holds a weak reference and stops on its own once the
    /// service is dropped.
    pub fn spawn(service: &Arc<CombatService>, interval: Duration) -> TickerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let ticker = Self {
            service: Arc::downgrade(service),
            interval,
            shutdown: shutdown_rx,
        };
        let join = tokio::spawn(ticker.run());
        TickerHandle {
            shutdown: shutdown_tx,
            join,
        }
    }

    pub async fn run(mut self) {
        info!(interval_ms = self.interval.as_millis() as u64, "effect ticker started");

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let Some(service) = self.service.upgrade() else {
                        debug!("combat service dropped");
                        break;
                    };
                    Self::sweep(service).await;
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("effect ticker stopped");
    }

    async fn sweep(service: Arc<CombatService>) {
        let characters = match service.characters_in_combat().await {
            Ok(characters) => characters,
            Err(err) => {
                warn!(error = %err, "failed to list characters in combat");
                return;
            }
        };
        let now = service.now();

        for character in characters {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                match service.tick_character(character, now).await {
                    Ok(TickResult::Ticked { log, .. }) if !log.is_empty() => {
                        debug!(%character, %now, lines = log.len(), "effects applied");
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!(%character, error = %err, "effect tick failed");
                    }
                }
            });
        }
    }
}
