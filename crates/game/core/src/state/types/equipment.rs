//! Equipment summary supplied by the inventory/equipment service.
//!
//! Combat never looks at individual equipped items; it only needs the weapon
//! damage range, the summed armor value and per-item stat bonuses.

use crate::stats::StatBlock;

/// Damage range of the equipped weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub damage_min: u32,
    pub damage_max: u32,
}

impl WeaponProfile {
    pub const fn new(damage_min: u32, damage_max: u32) -> Self {
        Self {
            damage_min,
            damage_max,
        }
    }
}

/// Aggregate of everything a character has equipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Equipment {
    pub weapon: Option<WeaponProfile>,
    /// Sum of armor values across all equipped pieces.
    pub armor_total: u32,
    /// Stat bonuses, one entry per equipped item.
    pub bonuses: Vec<StatBlock>,
}

impl Equipment {
    /// Nothing equipped.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder-style weapon setter.
    #[must_use]
    pub fn with_weapon(mut self, damage_min: u32, damage_max: u32) -> Self {
        self.weapon = Some(WeaponProfile::new(damage_min, damage_max));
        self
    }

    /// Builder-style armor setter.
    #[must_use]
    pub fn with_armor(mut self, armor_total: u32) -> Self {
        self.armor_total = armor_total;
        self
    }

    /// Builder-style bonus appender.
    #[must_use]
    pub fn with_bonus(mut self, bonus: StatBlock) -> Self {
        self.bonuses.push(bonus);
        self
    }
}
