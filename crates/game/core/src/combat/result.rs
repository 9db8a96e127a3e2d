//! Round results and their presentation projection.

use strum::{Display, IntoStaticStr};

use crate::loot::LootDrop;
use crate::state::{Character, CombatSession, DungeonRunId, Inventory, NamedMobId};

use super::leveling::LevelUp;

/// Rewards granted when the enemy falls.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictoryRewards {
    pub exp_gained: u64,
    pub gold_gained: u64,
    pub loot: Vec<LootDrop>,
    pub level_up: Option<LevelUp>,
    /// Set when the defeated enemy was a named mob; the host records it.
    pub named_defeat: Option<NamedMobId>,
}

/// Terminal state of one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundOutcome {
    /// Both sides are still standing.
    Continue {
        character_health: u32,
        enemy_health: u32,
    },
    Victory(VictoryRewards),
    Defeat {
        /// Health the character respawns with.
        respawn_health: u32,
        /// Dungeon run that fails with this defeat, if any.
        dungeon_failed: Option<DungeonRunId>,
    },
}

impl RoundOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            RoundOutcome::Continue { .. } => OutcomeKind::Continue,
            RoundOutcome::Victory(_) => OutcomeKind::Victory,
            RoundOutcome::Defeat { .. } => OutcomeKind::Defeat,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundOutcome::Continue { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutcomeKind {
    Continue,
    Victory,
    Defeat,
}

/// Updated records produced by one round.
///
/// The resolver never persists anything; the caller stores `session`,
/// `character` and `inventory` once the round returns.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundResult {
    pub session: CombatSession,
    pub character: Character,
    pub inventory: Inventory,
    pub outcome: RoundOutcome,
    pub log: Vec<String>,
}

impl RoundResult {
    /// Presentation-facing view of the round.
    pub fn report(&self) -> RoundReport {
        let mut report = RoundReport {
            log: self.log.clone(),
            outcome: self.outcome.kind(),
            exp_gained: None,
            gold_gained: None,
            loot: Vec::new(),
            level_up: false,
            new_level: None,
        };
        if let RoundOutcome::Victory(rewards) = &self.outcome {
            report.exp_gained = Some(rewards.exp_gained);
            report.gold_gained = Some(rewards.gold_gained);
            report.loot = rewards.loot.clone();
            report.level_up = rewards.level_up.is_some();
            report.new_level = rewards.level_up.map(|l| l.to_level);
        }
        report
    }
}

/// Round summary consumed by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    pub log: Vec<String>,
    pub outcome: OutcomeKind,
    pub exp_gained: Option<u64>,
    pub gold_gained: Option<u64>,
    pub loot: Vec<LootDrop>,
    pub level_up: bool,
    pub new_level: Option<u32>,
}

/// Updated records produced by an effect tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionTick {
    pub session: CombatSession,
    pub character: Character,
    pub log: Vec<String>,
}
