//! Static effect templates attached to abilities.

use strum::{Display, IntoStaticStr};

use crate::state::Side;
use crate::stats::Stat;

/// What an effect definition does when it lands.
///
/// `Damage` and `Heal` become DOT/HOT when the definition is periodic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EffectType {
    Damage,
    Heal,
    Drain,
    Buff,
    Debuff,
    Shield,
}

/// Immutable effect template, loaded once with the ability catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityEffectDef {
    pub name: String,
    pub effect_type: EffectType,
    pub target: Side,
    pub value_min: u32,
    pub value_max: u32,
    /// Attribute whose distance from 10 scales the value.
    pub stat_scaling: Option<Stat>,
    pub scaling_factor: f64,
    /// Trigger probability in `[0, 1]`.
    pub chance: f64,
    /// Lifetime in seconds for buffs, debuffs and shields.
    pub duration: u64,
    pub is_periodic: bool,
    pub tick_interval: u64,
    pub tick_count: u32,
    /// Fixed per-tick value; computed from the value range when absent.
    pub tick_value: Option<u32>,
    pub stat_affected: Option<Stat>,
    /// Share of drain damage returned as healing.
    pub drain_percent: f64,
    /// Fixed shield pool; computed from the value range when absent.
    pub shield_amount: Option<u32>,
}

impl Default for AbilityEffectDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            effect_type: EffectType::Damage,
            target: Side::Enemy,
            value_min: 1,
            value_max: 1,
            stat_scaling: None,
            scaling_factor: 0.0,
            chance: 1.0,
            duration: 0,
            is_periodic: false,
            tick_interval: 0,
            tick_count: 0,
            tick_value: None,
            stat_affected: None,
            drain_percent: 0.0,
            shield_amount: None,
        }
    }
}

impl AbilityEffectDef {
    /// Definitions resolved immediately at cast time instead of lingering.
    pub fn is_instant(&self) -> bool {
        !self.is_periodic
            && matches!(
                self.effect_type,
                EffectType::Damage | EffectType::Heal | EffectType::Drain
            )
    }

    /// Periodic definition with at least one tick scheduled.
    pub fn is_ticking(&self) -> bool {
        self.is_periodic && self.tick_count > 0
    }
}
