//! High-level runtime orchestrator.
//!
//! The runtime owns the combat service and the effect ticker, and exposes a
//! builder-based API for hosts to wire in a repository and content.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use combat_content::ContentFactory;
use combat_core::{CombatConfig, ContentSnapshot, RngOracle};

use crate::api::{Result, ServiceError};
use crate::events::{Event, EventBus, Topic};
use crate::repository::{CombatRepository, InMemoryRepository};
use crate::rng::GameClock;
use crate::service::CombatService;
use crate::workers::{EffectTicker, TickerHandle};

/// Runtime configuration shared across the service and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Period of the effect ticker.
    pub tick_interval: Duration,
    /// Capacity of each event topic.
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            tick_interval: Duration::from_secs(1),
            event_buffer_size: 100,
        }
    }
}

/// Running combat host: the shared service plus its background ticker.
pub struct CombatRuntime {
    service: Arc<CombatService>,
    ticker: TickerHandle,
}

impl CombatRuntime {
    pub fn builder() -> CombatRuntimeBuilder {
        CombatRuntimeBuilder::new()
    }

    /// Shared service; clone the `Arc` to hand it to request handlers.
    pub fn service(&self) -> Arc<CombatService> {
        Arc::clone(&self.service)
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.service.subscribe(topic)
    }

    /// Stop the ticker and wait for it to exit.
    pub async fn shutdown(self) -> Result<()> {
        self.ticker
            .shutdown()
            .await
            .map_err(|err| ServiceError::Worker(err.to_string()))
    }
}

/// Builder for [`CombatRuntime`].
pub struct CombatRuntimeBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn CombatRepository>>,
    content: Option<ContentSnapshot>,
    data_dir: Option<PathBuf>,
    rng: Option<Box<dyn RngOracle + Send>>,
    clock: Option<GameClock>,
}

impl CombatRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
            content: None,
            data_dir: None,
            rng: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Storage backend. Defaults to [`InMemoryRepository`].
    pub fn repository(mut self, repository: Arc<dyn CombatRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Use an already-built content snapshot.
    pub fn content(mut self, content: ContentSnapshot) -> Self {
        self.content = Some(content);
        self
    }

    /// Load content and `config.toml` from a data directory.
    ///
    /// A config file found there replaces `RuntimeConfig::combat`.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn rng(mut self, rng: impl RngOracle + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn clock(mut self, clock: GameClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the runtime and spawn the effect ticker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> Result<CombatRuntime> {
        let mut config = self.config;

        let content = match (self.content, self.data_dir) {
            (Some(content), _) => content,
            (None, Some(dir)) => {
                let factory = ContentFactory::new(dir);
                config.combat = factory.load_config().map_err(content_error)?;
                factory.load_snapshot().map_err(content_error)?
            }
            (None, None) => {
                return Err(ServiceError::Content(
                    "no content snapshot or data directory configured".to_string(),
                ));
            }
        };

        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryRepository::new()));

        let mut service = CombatService::new(repository, Arc::new(content), config.combat)
            .with_event_bus(EventBus::with_capacity(config.event_buffer_size));
        if let Some(rng) = self.rng {
            service = service.with_boxed_rng(rng);
        }
        if let Some(clock) = self.clock {
            service = service.with_clock(clock);
        }

        let service = Arc::new(service);
        let ticker = EffectTicker::spawn(&service, config.tick_interval);

        Ok(CombatRuntime { service, ticker })
    }
}

fn content_error(err: anyhow::Error) -> ServiceError {
    ServiceError::Content(format!("{err:#}"))
}
