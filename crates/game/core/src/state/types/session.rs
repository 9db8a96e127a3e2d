//! Combat session record.
//!
//! A session is created when combat starts and ends on victory or defeat. It
//! carries per-side health counters and the effects active on both sides, so
//! resolvers can be handed the whole combat as one value.

use strum::{Display, IntoStaticStr};

use crate::effects::EffectSet;

use super::character::Character;
use super::common::{CharacterId, DungeonRunId, EnemyId, SessionId, Timestamp};
use super::enemy::Enemy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SessionStatus {
    Active,
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSession {
    pub id: SessionId,
    pub character_id: CharacterId,
    pub enemy_id: EnemyId,
    pub character_health: u32,
    pub enemy_health: u32,
    pub status: SessionStatus,
    pub effects: EffectSet,
    /// Set when the combat is part of a dungeon run.
    pub dungeon_run: Option<DungeonRunId>,
    pub started_at: Timestamp,
    /// Number of rounds resolved so far.
    pub round: u32,
}

impl CombatSession {
    /// Opens a session with the character at its current health and the
    /// enemy at full health.
    pub fn start(
        id: SessionId,
        character: &Character,
        enemy: &Enemy,
        dungeon_run: Option<DungeonRunId>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            character_id: character.id,
            enemy_id: enemy.id(),
            character_health: character.health,
            enemy_health: enemy.stats().max_health,
            status: SessionStatus::Active,
            effects: EffectSet::empty(),
            dungeon_run,
            started_at: now,
            round: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}
