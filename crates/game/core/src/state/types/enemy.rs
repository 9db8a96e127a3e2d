//! Enemy templates.
//!
//! Regular mobs and named mobs share one combat profile ([`MobStats`]); the
//! resolver only ever talks to [`Enemy`], so there is a single code path for
//! both variants.

use crate::env::RngOracle;

use super::common::{EnemyId, MobId, NamedMobId};

/// Combat profile shared by every enemy variant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MobStats {
    pub name: String,
    pub level: u32,
    pub max_health: u32,
    pub damage_min: u32,
    pub damage_max: u32,
    pub defense: u32,
    /// Seconds between swings; informational for the presentation layer.
    pub attack_speed: u32,
    pub exp_reward: u32,
    pub gold_min: u32,
    pub gold_max: u32,
}

/// Regular mob template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mob {
    pub id: MobId,
    pub stats: MobStats,
    /// Probability in `[0, 1]` that this mob starts combat on its own.
    pub aggro_chance: f64,
}

/// Rare, unique enemy. Never initiates combat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedMob {
    pub id: NamedMobId,
    pub title: String,
    pub stats: MobStats,
}

/// Immutable enemy template consumed by the combat resolver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Enemy {
    Regular(Mob),
    Named(NamedMob),
}

impl Enemy {
    pub fn id(&self) -> EnemyId {
        match self {
            Enemy::Regular(mob) => EnemyId::Regular(mob.id),
            Enemy::Named(named) => EnemyId::Named(named.id),
        }
    }

    pub fn stats(&self) -> &MobStats {
        match self {
            Enemy::Regular(mob) => &mob.stats,
            Enemy::Named(named) => &named.stats,
        }
    }

    pub fn name(&self) -> &str {
        &self.stats().name
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Enemy::Named(_))
    }

    /// Damage range as `(min, max)`.
    pub fn damage_range(&self) -> (u32, u32) {
        let stats = self.stats();
        (stats.damage_min, stats.damage_max)
    }

    /// Gold reward range as `(min, max)`.
    pub fn gold_range(&self) -> (u32, u32) {
        let stats = self.stats();
        (stats.gold_min, stats.gold_max)
    }

    /// Roll whether this enemy starts combat on its own during exploration.
    ///
    /// Named mobs never do and consume no roll.
    pub fn roll_aggro(&self, rng: &mut impl RngOracle) -> bool {
        match self {
            Enemy::Regular(mob) => rng.chance(mob.aggro_chance),
            Enemy::Named(_) => false,
        }
    }
}
