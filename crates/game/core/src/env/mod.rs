//! Traits describing read-only combat content.
//!
//! Oracles expose enemy templates, ability definitions, item definitions and
//! loot tables. The [`CombatEnv`] aggregate bundles them with the combat
//! configuration so resolvers can reach everything they need without hard
//! coupling to concrete implementations.
mod actors;
mod items;
mod rng;
mod snapshot;
mod tables;

pub use actors::{AbilityOracle, EnemyOracle};
pub use items::{ItemDefinition, ItemOracle};
pub use rng::{PcgRng, RngOracle, SequenceRng};
pub use snapshot::ContentSnapshot;
pub use tables::{LootEntry, LootOracle};

use crate::config::CombatConfig;

/// Aggregates read-only oracles required by the resolvers.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub enemies: &'a dyn EnemyOracle,
    pub abilities: &'a dyn AbilityOracle,
    pub items: &'a dyn ItemOracle,
    pub loot: &'a dyn LootOracle,
    pub config: &'a CombatConfig,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        enemies: &'a dyn EnemyOracle,
        abilities: &'a dyn AbilityOracle,
        items: &'a dyn ItemOracle,
        loot: &'a dyn LootOracle,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            enemies,
            abilities,
            items,
            loot,
            config,
        }
    }

    /// Borrows every oracle from one snapshot.
    pub fn from_snapshot(snapshot: &'a ContentSnapshot, config: &'a CombatConfig) -> Self {
        Self::new(snapshot, snapshot, snapshot, snapshot, config)
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
