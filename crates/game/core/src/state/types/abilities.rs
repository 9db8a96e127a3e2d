//! Castable abilities.
//!
//! An ability has a primary action (damage or heal) paid for with mana, plus
//! optional effect definitions resolved when the cast succeeds.

use crate::effects::AbilityEffectDef;

use super::common::AbilityId;

/// Primary action of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    /// Adds a uniform roll in `[min, max]` to the attacker's damage.
    Damage { min: u32, max: u32 },
    /// Restores a uniform roll in `[min, max]` health, capped at max health.
    Heal { min: u32, max: u32 },
}

/// Immutable ability definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    pub mana_cost: u32,
    pub kind: AbilityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<AbilityEffectDef>,
}

impl Ability {
    pub fn can_afford(&self, mana: u32) -> bool {
        mana >= self.mana_cost
    }
}
