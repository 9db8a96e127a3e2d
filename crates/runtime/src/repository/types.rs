//! Records persisted alongside the core combat records.

use serde::{Deserialize, Serialize};

use combat_core::{CharacterId, DungeonId, DungeonRunId, NamedMobId, Timestamp};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DungeonStatus {
    Active,
    Completed,
    Failed,
}

/// One attempt at a dungeon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonRun {
    pub id: DungeonRunId,
    pub character: CharacterId,
    pub dungeon: DungeonId,
    pub status: DungeonStatus,
    pub started_at: Timestamp,
}

impl DungeonRun {
    pub fn is_active(&self) -> bool {
        self.status == DungeonStatus::Active
    }
}

/// A character's victory over a named mob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedDefeat {
    pub character: CharacterId,
    pub named_mob: NamedMobId,
    pub defeated_at: Timestamp,
}
