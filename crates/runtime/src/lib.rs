//! Async host for the combat engine.
//!
//! This crate wires the pure resolvers from `combat-core` to a repository,
//! a shared randomness source, an event bus and a periodic effect ticker.
//! Consumers embed [`CombatRuntime`] and drive play through the shared
//! [`CombatService`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`service`] serializes per-character operations and persists results
//! - [`api`] exposes the error types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] stores mutable records
//! - [`rng`] adapts `rand` and the Tokio clock to the engine's oracles
pub mod api;
pub mod events;
pub mod repository;
pub mod rng;
pub mod runtime;
pub mod service;

mod workers;

pub use api::{RepositoryError, Result, ServiceError};
pub use events::{CombatEvent, EffectsEvent, Event, EventBus, Topic};
pub use repository::{
    CombatRepository, DungeonRun, DungeonStatus, InMemoryRepository, NamedDefeat,
};
pub use rng::{GameClock, StdRngOracle};
pub use runtime::{CombatRuntime, CombatRuntimeBuilder, RuntimeConfig};
pub use service::{CombatService, TickResult};
pub use workers::{EffectTicker, TickerHandle};
