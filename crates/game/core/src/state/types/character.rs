use std::str::FromStr;

use crate::config::CombatConfig;
use crate::state::error::CharacterError;
use crate::stats::{ProgressionCalculator, Stat, StatBlock};

use super::common::CharacterId;

/// Persistent player character record.
///
/// Combat mutates health, mana, experience, gold and level; stat-point
/// assignment mutates attributes. `max_health`/`max_mana` are the stored base
/// maximums; combat always recomputes maximums from effective attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub attributes: StatBlock,
    pub level: u32,
    pub experience: u64,
    pub gold: u64,
    pub health: u32,
    pub mana: u32,
    pub max_health: u32,
    pub max_mana: u32,
    pub stat_points: u32,
}

impl Character {
    /// Create a level-1 character at full health and mana.
    ///
    /// Max mana uses the creation-time formula; the first level-up moves the
    /// character onto the combat-time formula.
    pub fn create(
        id: CharacterId,
        name: impl Into<String>,
        attributes: StatBlock,
        config: &CombatConfig,
    ) -> Result<Self, CharacterError> {
        let name = name.into();
        let len = name.chars().count();
        if name.trim().is_empty() || len > CombatConfig::MAX_NAME_LEN {
            return Err(CharacterError::InvalidName {
                len,
                max: CombatConfig::MAX_NAME_LEN,
            });
        }

        let attributes = StatBlock {
            defense: 0,
            ..attributes
        };
        let max_health = ProgressionCalculator::max_health(1, attributes.constitution);
        let max_mana = ProgressionCalculator::creation_max_mana(attributes.intelligence);

        Ok(Self {
            id,
            name,
            attributes,
            level: 1,
            experience: 0,
            gold: config.starting_gold,
            health: max_health,
            mana: max_mana,
            max_health,
            max_mana,
            stat_points: config.starting_stat_points,
        })
    }

    /// Spend one available stat point on `stat`.
    ///
    /// Raising constitution or intelligence recomputes the stored maximum with
    /// the canonical formula; current health and mana are left untouched.
    pub fn assign_stat_point(&mut self, stat: Stat) -> Result<(), CharacterError> {
        if stat == Stat::Defense {
            return Err(CharacterError::invalid_stat(stat));
        }
        if self.stat_points == 0 {
            return Err(CharacterError::NoStatPoints);
        }

        self.stat_points -= 1;
        *self.attributes.get_mut(stat) += 1;

        match stat {
            Stat::Constitution => {
                self.max_health =
                    ProgressionCalculator::max_health(self.level, self.attributes.constitution);
            }
            Stat::Intelligence => {
                self.max_mana =
                    ProgressionCalculator::max_mana(self.level, self.attributes.intelligence);
            }
            _ => {}
        }
        Ok(())
    }

    /// Like [`Character::assign_stat_point`], parsing the stat from its name.
    pub fn assign_stat_point_by_name(&mut self, name: &str) -> Result<Stat, CharacterError> {
        let stat = Stat::from_str(name).map_err(|_| CharacterError::InvalidStat {
            name: name.to_string(),
        })?;
        self.assign_stat_point(stat)?;
        Ok(stat)
    }
}
