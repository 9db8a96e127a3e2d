//! Experience and level-up.

use crate::config::CombatConfig;
use crate::state::Character;
use crate::stats::{ProgressionCalculator, StatBlock};

/// Summary of one or more consecutive level-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub from_level: u32,
    pub to_level: u32,
    pub points_gained: u32,
}

/// Add experience and apply every level-up it pays for.
///
/// While `experience >= level × xp_per_level` the threshold is spent, the
/// level increases, stat points are granted and the stored maximums are
/// recomputed from base attributes. Current health and mana gain the flat
/// per-level bonus, capped at the maximums derived from `effective`.
///
/// Returns `None` when no level was gained.
pub fn gain_experience(
    character: &mut Character,
    amount: u64,
    effective: &StatBlock,
    config: &CombatConfig,
) -> Option<LevelUp> {
    character.experience = character.experience.saturating_add(amount);
    if config.xp_per_level == 0 {
        return None;
    }

    let from_level = character.level;
    let mut points_gained = 0;

    loop {
        let threshold = config.xp_threshold(character.level);
        if character.experience < threshold {
            break;
        }
        character.experience -= threshold;
        character.level += 1;
        character.stat_points += config.points_per_level;
        points_gained += config.points_per_level;

        character.max_health =
            ProgressionCalculator::max_health(character.level, character.attributes.constitution);
        character.max_mana =
            ProgressionCalculator::max_mana(character.level, character.attributes.intelligence);

        let health_cap = ProgressionCalculator::max_health(character.level, effective.constitution);
        let mana_cap = ProgressionCalculator::max_mana(character.level, effective.intelligence);
        character.health = character
            .health
            .saturating_add(config.level_up_health_bonus)
            .min(health_cap);
        character.mana = character
            .mana
            .saturating_add(config.level_up_mana_bonus)
            .min(mana_cap);
    }

    (character.level > from_level).then_some(LevelUp {
        from_level,
        to_level: character.level,
        points_gained,
    })
}
