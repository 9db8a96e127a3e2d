//! Combat resolution.
//!
//! Pure functions and a stateless [`CombatResolver`] that take the current
//! records, a timestamp and an [`crate::env::RngOracle`], and return updated
//! records plus log lines. Nothing here persists state.
//!
//! - `damage`: weapon, strength and armor formulas
//! - `leveling`: experience thresholds and level-up
//! - `round`: one attacker/enemy exchange with victory and defeat handling
//! - `ticks`: damage and heal over time between rounds

pub mod damage;
pub mod error;
pub mod leveling;
pub mod result;
pub mod round;
mod ticks;

pub use damage::{
    apply_damage, apply_healing, mitigate_with_armor, roll_enemy_damage, roll_weapon_damage,
    strength_modifier, weapon_profile,
};
pub use error::CombatError;
pub use leveling::{LevelUp, gain_experience};
pub use result::{
    OutcomeKind, RoundOutcome, RoundReport, RoundResult, SessionTick, VictoryRewards,
};
pub use round::{CombatResolver, RoundInput, attacker_stats, enemy_defense};
