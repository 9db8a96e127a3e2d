//! Events published by the combat service.

use serde::{Deserialize, Serialize};

use combat_core::{
    CharacterId, EffectView, EnemyId, LevelUp, OutcomeKind, RoundReport, SessionId, Timestamp,
};

/// Lifecycle and round events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    Started {
        character: CharacterId,
        session: SessionId,
        enemy: EnemyId,
    },
    RoundResolved {
        character: CharacterId,
        session: SessionId,
        report: RoundReport,
    },
    Ended {
        character: CharacterId,
        session: SessionId,
        outcome: OutcomeKind,
    },
    LeveledUp {
        character: CharacterId,
        level_up: LevelUp,
    },
}

/// Effect list refresh, published on the tick cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectsEvent {
    pub character: CharacterId,
    pub at: Timestamp,
    pub log: Vec<String>,
    pub effects: Vec<EffectView>,
}
