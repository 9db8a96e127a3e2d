//! Progression formulas - resource maximums and level thresholds.
//!
//! Maximums are never trusted from storage during combat: they are recomputed
//! from level and effective attributes every time they are needed.
//!
//! Formulas:
//! - HP_max = 100 + Level × 20 + (CON - 10) × 8
//! - MP_max = 100 + Level × 20 + (INT - 10) × 5
//! - MP_max at creation = 50 + (INT - 10) × 3
//!
//! The creation-time mana formula diverges from the combat-time one. Both are
//! kept as-is; a character created with the first is moved onto the second by
//! its first level-up.

use crate::config::CombatConfig;

/// Pure progression formulas.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressionCalculator;

impl ProgressionCalculator {
    /// Compute HP maximum, floored at 1.
    ///
    /// Formula: 100 + Level × 20 + (CON - 10) × 8
    pub fn max_health(level: u32, constitution: i32) -> u32 {
        let value = 100
            + i64::from(level) * 20
            + (i64::from(constitution) - i64::from(CombatConfig::NEUTRAL_STAT)) * 8;
        clamp_to_u32(value, 1)
    }

    /// Compute MP maximum used everywhere in combat, floored at 0.
    ///
    /// Formula: 100 + Level × 20 + (INT - 10) × 5
    pub fn max_mana(level: u32, intelligence: i32) -> u32 {
        let value = 100
            + i64::from(level) * 20
            + (i64::from(intelligence) - i64::from(CombatConfig::NEUTRAL_STAT)) * 5;
        clamp_to_u32(value, 0)
    }

    /// Compute MP maximum assigned at character creation, floored at 0.
    ///
    /// Formula: 50 + (INT - 10) × 3
    pub fn creation_max_mana(intelligence: i32) -> u32 {
        let value = 50 + (i64::from(intelligence) - i64::from(CombatConfig::NEUTRAL_STAT)) * 3;
        clamp_to_u32(value, 0)
    }

    /// Experience needed to leave `level`.
    pub fn xp_threshold(level: u32, config: &CombatConfig) -> u64 {
        config.xp_threshold(level)
    }
}

fn clamp_to_u32(value: i64, floor: i64) -> u32 {
    value.clamp(floor, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_constitution_fifteen() {
        assert_eq!(ProgressionCalculator::max_health(1, 15), 160);
    }

    #[test]
    fn neutral_stats_at_level_one() {
        assert_eq!(ProgressionCalculator::max_health(1, 10), 120);
        assert_eq!(ProgressionCalculator::max_mana(1, 10), 120);
        assert_eq!(ProgressionCalculator::creation_max_mana(10), 50);
    }

    #[test]
    fn creation_mana_diverges_from_combat_mana() {
        assert_eq!(ProgressionCalculator::creation_max_mana(16), 68);
        assert_eq!(ProgressionCalculator::max_mana(1, 16), 150);
    }

    #[test]
    fn floors_hold_for_tiny_attributes() {
        assert_eq!(ProgressionCalculator::max_health(1, -100), 1);
        assert_eq!(ProgressionCalculator::max_mana(1, -100), 0);
        assert_eq!(ProgressionCalculator::creation_max_mana(0), 20);
        assert_eq!(ProgressionCalculator::creation_max_mana(-20), 0);
    }

    #[test]
    fn maximums_are_monotone_in_level_and_attribute() {
        for level in 1..40u32 {
            for stat in -5..40i32 {
                let hp = ProgressionCalculator::max_health(level, stat);
                assert!(ProgressionCalculator::max_health(level + 1, stat) >= hp);
                assert!(ProgressionCalculator::max_health(level, stat + 1) >= hp);

                let mp = ProgressionCalculator::max_mana(level, stat);
                assert!(ProgressionCalculator::max_mana(level + 1, stat) >= mp);
                assert!(ProgressionCalculator::max_mana(level, stat + 1) >= mp);
            }
        }
    }

    #[test]
    fn threshold_scales_with_level() {
        let config = CombatConfig::default();
        assert_eq!(ProgressionCalculator::xp_threshold(1, &config), 125);
        assert_eq!(ProgressionCalculator::xp_threshold(4, &config), 500);
    }
}
