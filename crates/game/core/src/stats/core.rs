//! Core attributes - the six stored stats every character carries.
//!
//! [`StatBlock`] is used both for stored base attributes and for additive
//! bonus totals (equipment, buffs, debuffs), so every value is signed.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::config::CombatConfig;

/// The six core attributes.
///
/// Names parse case-insensitively from their lowercase form (`"strength"`),
/// which is how effect definitions reference them in content files.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Stat {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
    /// Mitigation stat; only meaningful for buff/debuff targets, never stored
    /// on characters (their base defense is always 0).
    Defense,
}

/// Flat block of attribute values or attribute deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub defense: i32,
}

impl StatBlock {
    /// All-zero block, the identity for [`StatBlock::plus`].
    pub const ZERO: Self = Self {
        strength: 0,
        dexterity: 0,
        constitution: 0,
        intelligence: 0,
        wisdom: 0,
        charisma: 0,
        defense: 0,
    };

    /// Block with every attribute at the neutral value (10) and no defense.
    pub const fn neutral() -> Self {
        let n = CombatConfig::NEUTRAL_STAT;
        Self {
            strength: n,
            dexterity: n,
            constitution: n,
            intelligence: n,
            wisdom: n,
            charisma: n,
            defense: 0,
        }
    }

    pub const fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
            defense: 0,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Dexterity => self.dexterity,
            Stat::Constitution => self.constitution,
            Stat::Intelligence => self.intelligence,
            Stat::Wisdom => self.wisdom,
            Stat::Charisma => self.charisma,
            Stat::Defense => self.defense,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Dexterity => &mut self.dexterity,
            Stat::Constitution => &mut self.constitution,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Wisdom => &mut self.wisdom,
            Stat::Charisma => &mut self.charisma,
            Stat::Defense => &mut self.defense,
        }
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, stat: Stat, value: i32) -> Self {
        *self.get_mut(stat) = value;
        self
    }

    /// Per-stat sum of two blocks.
    #[must_use]
    pub fn plus(&self, other: &StatBlock) -> StatBlock {
        StatBlock {
            strength: self.strength + other.strength,
            dexterity: self.dexterity + other.dexterity,
            constitution: self.constitution + other.constitution,
            intelligence: self.intelligence + other.intelligence,
            wisdom: self.wisdom + other.wisdom,
            charisma: self.charisma + other.charisma,
            defense: self.defense + other.defense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn stat_names_parse_case_insensitively() {
        assert_eq!(Stat::from_str("strength"), Ok(Stat::Strength));
        assert_eq!(Stat::from_str("Constitution"), Ok(Stat::Constitution));
        assert!(Stat::from_str("luck").is_err());
        assert_eq!(Stat::Intelligence.to_string(), "intelligence");
    }

    #[test]
    fn get_and_get_mut_address_the_same_field() {
        let mut block = StatBlock::ZERO;
        for (i, stat) in Stat::iter().enumerate() {
            *block.get_mut(stat) = i as i32 + 1;
        }
        for (i, stat) in Stat::iter().enumerate() {
            assert_eq!(block.get(stat), i as i32 + 1);
        }
    }
}
