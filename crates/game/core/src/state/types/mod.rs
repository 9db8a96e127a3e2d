pub mod abilities;
pub mod character;
pub mod common;
pub mod enemy;
pub mod equipment;
pub mod inventory;
pub mod session;

pub use abilities::{Ability, AbilityKind};
pub use character::Character;
pub use common::{
    AbilityId, CharacterId, DungeonId, DungeonRunId, EffectId, EnemyId, ItemId, MobId, NamedMobId,
    SessionId, Side, Timestamp,
};
pub use enemy::{Enemy, Mob, MobStats, NamedMob};
pub use equipment::{Equipment, WeaponProfile};
pub use inventory::{Inventory, InventoryEntry};
pub use session::{CombatSession, SessionStatus};
