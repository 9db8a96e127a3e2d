//! Combat records.
//!
//! Plain data owned by the host's persistence layer. Resolvers receive these
//! records, return updated copies, and never persist anything themselves.
pub mod error;
pub mod types;

pub use error::CharacterError;
pub use types::{
    Ability, AbilityId, AbilityKind, Character, CharacterId, CombatSession, DungeonId,
    DungeonRunId, EffectId, Enemy, EnemyId, Equipment, Inventory, InventoryEntry, ItemId, Mob,
    MobId, MobStats, NamedMob, NamedMobId, SessionId, SessionStatus, Side, Timestamp,
    WeaponProfile,
};
