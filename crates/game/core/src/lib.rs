//! Deterministic combat rules and status effects.
//!
//! `combat-core` defines the canonical rules (progression, stat resolution,
//! effects, loot, combat rounds) and exposes pure APIs that the runtime and
//! offline tools can share. Resolvers take current records, a caller-supplied
//! [`Timestamp`] and an injected [`RngOracle`], and return updated records plus
//! log lines; persistence is always the caller's job.
pub mod combat;
pub mod config;
pub mod effects;
pub mod env;
pub mod error;
pub mod loot;
pub mod state;
pub mod stats;

pub use combat::{
    CombatError, CombatResolver, LevelUp, OutcomeKind, RoundInput, RoundOutcome, RoundReport,
    RoundResult, SessionTick, VictoryRewards,
};
pub use config::CombatConfig;
pub use effects::{
    AbilityEffectDef, ActiveEffect, ActiveEffectKind, ActiveEffectType, EffectEngine, EffectSet,
    EffectType, EffectView, InstantOutcome, PeriodicState, StackOutcome,
};
pub use env::{
    AbilityOracle, CombatEnv, ContentSnapshot, EnemyOracle, ItemDefinition, ItemOracle,
    LootEntry, LootOracle, PcgRng, RngOracle, SequenceRng,
};
pub use error::{EngineError, ErrorKind};
pub use loot::{LootDrop, LootResolver};
pub use state::{
    Ability, AbilityId, AbilityKind, Character, CharacterError, CharacterId, CombatSession,
    DungeonId, DungeonRunId, EffectId, Enemy, EnemyId, Equipment, Inventory, InventoryEntry,
    ItemId, Mob, MobId, MobStats, NamedMob, NamedMobId, SessionId, SessionStatus, Side,
    Timestamp, WeaponProfile,
};
pub use stats::{ProgressionCalculator, Stat, StatBlock, StatResolver};
