//! Effect value computation, instantiation and instant resolution.
//!
//! All functions are pure apart from the injected [`RngOracle`]. The stat
//! block passed in is the caster's effective attributes.

use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::state::{EffectId, Timestamp};
use crate::stats::{Stat, StatBlock};

use super::active::{ActiveEffect, ActiveEffectKind, PeriodicState};
use super::definition::{AbilityEffectDef, EffectType};

/// Result of resolving an instant effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstantOutcome {
    pub damage: Option<u32>,
    pub healing: Option<u32>,
    pub description: String,
}

/// Stateless effect operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectEngine;

impl EffectEngine {
    /// Compute an effect's magnitude.
    ///
    /// # Formula
    ///
    /// ```text
    /// base  = use_min ? value_min : uniform[value_min, value_max]
    /// value = base + floor((stat - 10) × scaling_factor)   (when scaling applies)
    /// value = max(value, 1)
    /// ```
    ///
    /// Scaling applies when `stat_scaling` is set and `scaling_factor != 0`.
    /// Attributes a character does not carry (defense) scale from 10.
    pub fn calculate_effect_value(
        def: &AbilityEffectDef,
        attributes: &StatBlock,
        use_min: bool,
        rng: &mut impl RngOracle,
    ) -> u32 {
        let base = if use_min {
            def.value_min
        } else {
            rng.range(def.value_min, def.value_max)
        };

        let mut value = i64::from(base);
        if let Some(stat) = def.stat_scaling
            && def.scaling_factor != 0.0
        {
            let stat_value = match stat {
                Stat::Defense => CombatConfig::NEUTRAL_STAT,
                other => attributes.get(other),
            };
            let delta = f64::from(stat_value - CombatConfig::NEUTRAL_STAT) * def.scaling_factor;
            value += delta.floor() as i64;
        }

        value.clamp(1, i64::from(u32::MAX)) as u32
    }

    /// Bernoulli trial against the definition's trigger chance.
    pub fn should_trigger(def: &AbilityEffectDef, rng: &mut impl RngOracle) -> bool {
        rng.chance(def.chance)
    }

    /// Instantiate a lingering effect at cast time.
    ///
    /// Returns `None` when the trigger roll fails or when the definition does
    /// not describe a lingering effect (instant types, missing stat, zero
    /// interval or duration). A mismatch is not an error.
    ///
    /// The returned effect carries a default id; [`super::EffectSet::add_or_stack`]
    /// assigns the real one.
    pub fn create_active_effect(
        def: &AbilityEffectDef,
        source_name: &str,
        attributes: &StatBlock,
        now: Timestamp,
        rng: &mut impl RngOracle,
    ) -> Option<ActiveEffect> {
        if !Self::should_trigger(def, rng) {
            return None;
        }

        let (duration, kind) = if def.is_ticking() {
            if def.tick_interval == 0 {
                return None;
            }
            let tick_value = def
                .tick_value
                .unwrap_or_else(|| Self::calculate_effect_value(def, attributes, true, rng));
            let schedule = PeriodicState {
                tick_value,
                tick_interval: def.tick_interval,
                ticks_remaining: def.tick_count,
                next_tick_at: now + def.tick_interval,
                last_tick_at: None,
            };
            let kind = match def.effect_type {
                EffectType::Damage => ActiveEffectKind::Dot(schedule),
                EffectType::Heal => ActiveEffectKind::Hot(schedule),
                _ => return None,
            };
            (def.tick_interval * u64::from(def.tick_count), kind)
        } else {
            if def.duration == 0 {
                return None;
            }
            let kind = match (def.effect_type, def.stat_affected) {
                (EffectType::Buff, Some(stat)) => ActiveEffectKind::Buff {
                    stat,
                    amount: Self::signed_amount(def, attributes, rng),
                },
                (EffectType::Debuff, Some(stat)) => ActiveEffectKind::Debuff {
                    stat,
                    amount: -Self::signed_amount(def, attributes, rng),
                },
                (EffectType::Shield, _) => ActiveEffectKind::Shield {
                    remaining: def
                        .shield_amount
                        .unwrap_or_else(|| Self::calculate_effect_value(def, attributes, true, rng)),
                },
                _ => return None,
            };
            (def.duration, kind)
        };

        Some(ActiveEffect {
            id: EffectId::default(),
            name: def.name.clone(),
            source: source_name.to_string(),
            target: def.target,
            duration,
            expires_at: now + duration,
            stacks: 1,
            kind,
        })
    }

    /// Resolve a damage, heal or drain definition immediately.
    ///
    /// Samples the full value range. Damage is mitigated by `mob_defense`
    /// with a floor of 1; drain heals `floor(damage × drain_percent)`.
    /// Returns `None` for definitions that are not instant.
    pub fn process_instant_effect(
        def: &AbilityEffectDef,
        attributes: &StatBlock,
        mob_defense: u32,
        rng: &mut impl RngOracle,
    ) -> Option<InstantOutcome> {
        if !def.is_instant() {
            return None;
        }

        let value = Self::calculate_effect_value(def, attributes, false, rng);
        let outcome = match def.effect_type {
            EffectType::Damage => {
                let damage = value.saturating_sub(mob_defense).max(1);
                InstantOutcome {
                    damage: Some(damage),
                    healing: None,
                    description: format!("{} deals {} damage", def.name, damage),
                }
            }
            EffectType::Heal => InstantOutcome {
                damage: None,
                healing: Some(value),
                description: format!("{} restores {} health", def.name, value),
            },
            EffectType::Drain => {
                let damage = value.saturating_sub(mob_defense).max(1);
                let healing = (f64::from(damage) * def.drain_percent).floor().max(0.0) as u32;
                InstantOutcome {
                    damage: Some(damage),
                    healing: Some(healing),
                    description: format!(
                        "{} drains {} health and restores {}",
                        def.name, damage, healing
                    ),
                }
            }
            _ => return None,
        };
        Some(outcome)
    }

    fn signed_amount(
        def: &AbilityEffectDef,
        attributes: &StatBlock,
        rng: &mut impl RngOracle,
    ) -> i32 {
        Self::calculate_effect_value(def, attributes, true, rng).min(i32::MAX as u32) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ActiveEffectType, EffectSet};
    use crate::env::{PcgRng, SequenceRng};
    use crate::state::Side;

    fn def(effect_type: EffectType) -> AbilityEffectDef {
        AbilityEffectDef {
            name: "Test".to_string(),
            effect_type,
            value_min: 4,
            value_max: 8,
            ..AbilityEffectDef::default()
        }
    }

    #[test]
    fn strength_scaling_adds_floored_bonus() {
        let effect = AbilityEffectDef {
            value_min: 10,
            value_max: 10,
            stat_scaling: Some(Stat::Strength),
            scaling_factor: 0.5,
            ..def(EffectType::Damage)
        };
        let attributes = StatBlock::neutral().with(Stat::Strength, 20);
        let mut rng = PcgRng::seeded(1);
        assert_eq!(
            EffectEngine::calculate_effect_value(&effect, &attributes, false, &mut rng),
            15
        );
        assert_eq!(
            EffectEngine::calculate_effect_value(&effect, &attributes, true, &mut rng),
            15
        );
    }

    #[test]
    fn negative_scaling_floors_toward_minus_infinity_and_clamps_to_one() {
        let effect = AbilityEffectDef {
            value_min: 3,
            value_max: 3,
            stat_scaling: Some(Stat::Intelligence),
            scaling_factor: 0.5,
            ..def(EffectType::Damage)
        };
        let mut rng = SequenceRng::lowest();
        // (7 - 10) * 0.5 = -1.5 → -2
        let attributes = StatBlock::neutral().with(Stat::Intelligence, 7);
        assert_eq!(
            EffectEngine::calculate_effect_value(&effect, &attributes, true, &mut rng),
            1
        );
        let attributes = StatBlock::neutral().with(Stat::Intelligence, 0);
        assert_eq!(
            EffectEngine::calculate_effect_value(&effect, &attributes, true, &mut rng),
            1
        );
    }

    #[test]
    fn zero_factor_disables_scaling_and_min_skips_the_roll() {
        let effect = AbilityEffectDef {
            stat_scaling: Some(Stat::Strength),
            scaling_factor: 0.0,
            ..def(EffectType::Damage)
        };
        let attributes = StatBlock::neutral().with(Stat::Strength, 30);
        let mut rng = SequenceRng::new([3]);
        assert_eq!(
            EffectEngine::calculate_effect_value(&effect, &attributes, true, &mut rng),
            4
        );
        assert_eq!(rng.consumed(), 0);
        assert_eq!(
            EffectEngine::calculate_effect_value(&effect, &attributes, false, &mut rng),
            7
        );
    }

    #[test]
    fn failed_trigger_creates_nothing() {
        let effect = AbilityEffectDef {
            chance: 0.25,
            duration: 10,
            stat_affected: Some(Stat::Strength),
            ..def(EffectType::Buff)
        };
        let mut rng = SequenceRng::new([600]);
        let created = EffectEngine::create_active_effect(
            &effect,
            "Battle Cry",
            &StatBlock::neutral(),
            Timestamp(0),
            &mut rng,
        );
        assert!(created.is_none());
    }

    #[test]
    fn periodic_damage_becomes_dot_with_schedule() {
        let effect = AbilityEffectDef {
            name: "Poison".to_string(),
            is_periodic: true,
            tick_interval: 2,
            tick_count: 3,
            ..def(EffectType::Damage)
        };
        let mut rng = SequenceRng::lowest();
        let created = EffectEngine::create_active_effect(
            &effect,
            "Venom Strike",
            &StatBlock::neutral(),
            Timestamp(10),
            &mut rng,
        )
        .unwrap();

        assert_eq!(created.effect_type(), ActiveEffectType::Dot);
        assert_eq!(created.duration, 6);
        assert_eq!(created.expires_at, Timestamp(16));
        assert_eq!(created.source, "Venom Strike");
        let schedule = created.periodic().unwrap();
        assert_eq!(schedule.tick_value, 4);
        assert_eq!(schedule.ticks_remaining, 3);
        assert_eq!(schedule.next_tick_at, Timestamp(12));
    }

    #[test]
    fn explicit_tick_value_wins() {
        let effect = AbilityEffectDef {
            is_periodic: true,
            tick_interval: 1,
            tick_count: 5,
            tick_value: Some(9),
            target: Side::Attacker,
            ..def(EffectType::Heal)
        };
        let created = EffectEngine::create_active_effect(
            &effect,
            "Renew",
            &StatBlock::neutral(),
            Timestamp(0),
            &mut SequenceRng::lowest(),
        )
        .unwrap();
        assert_eq!(created.effect_type(), ActiveEffectType::Hot);
        assert_eq!(created.periodic().unwrap().tick_value, 9);
    }

    #[test]
    fn buff_and_debuff_use_minimum_value_with_sign() {
        let buff = AbilityEffectDef {
            duration: 30,
            stat_affected: Some(Stat::Strength),
            target: Side::Attacker,
            ..def(EffectType::Buff)
        };
        let debuff = AbilityEffectDef {
            duration: 30,
            stat_affected: Some(Stat::Defense),
            ..def(EffectType::Debuff)
        };
        let mut rng = SequenceRng::lowest();
        let attrs = StatBlock::neutral();

        let mut set = EffectSet::empty();
        set.add_or_stack(
            EffectEngine::create_active_effect(&buff, "Rally", &attrs, Timestamp(0), &mut rng)
                .unwrap(),
        );
        set.add_or_stack(
            EffectEngine::create_active_effect(&debuff, "Sunder", &attrs, Timestamp(0), &mut rng)
                .unwrap(),
        );
        assert_eq!(set.total_stat_modifier(Side::Attacker, Stat::Strength), 4);
        assert_eq!(set.total_stat_modifier(Side::Enemy, Stat::Defense), -4);
    }

    #[test]
    fn shield_prefers_explicit_amount() {
        let mut effect = AbilityEffectDef {
            duration: 12,
            target: Side::Attacker,
            shield_amount: Some(25),
            ..def(EffectType::Shield)
        };
        let mut rng = SequenceRng::lowest();
        let attrs = StatBlock::neutral();
        let created =
            EffectEngine::create_active_effect(&effect, "Ward", &attrs, Timestamp(3), &mut rng)
                .unwrap();
        assert_eq!(created.kind, ActiveEffectKind::Shield { remaining: 25 });
        assert_eq!(created.expires_at, Timestamp(15));

        effect.shield_amount = None;
        let created =
            EffectEngine::create_active_effect(&effect, "Ward", &attrs, Timestamp(3), &mut rng)
                .unwrap();
        assert_eq!(created.kind, ActiveEffectKind::Shield { remaining: 4 });
    }

    #[test]
    fn mismatched_definitions_yield_no_effect() {
        let attrs = StatBlock::neutral();
        let mut rng = SequenceRng::lowest();
        let cases = [
            // Instant damage is not a lingering effect.
            AbilityEffectDef {
                duration: 5,
                ..def(EffectType::Damage)
            },
            // Buff without a stat.
            AbilityEffectDef {
                duration: 5,
                ..def(EffectType::Buff)
            },
            // Periodic buff.
            AbilityEffectDef {
                is_periodic: true,
                tick_interval: 1,
                tick_count: 2,
                stat_affected: Some(Stat::Strength),
                ..def(EffectType::Buff)
            },
            // Periodic with zero interval.
            AbilityEffectDef {
                is_periodic: true,
                tick_count: 2,
                ..def(EffectType::Damage)
            },
        ];
        for case in &cases {
            assert!(
                EffectEngine::create_active_effect(case, "X", &attrs, Timestamp(0), &mut rng)
                    .is_none(),
                "{case:?}"
            );
        }
    }

    #[test]
    fn instant_damage_is_mitigated_with_floor_of_one() {
        let effect = def(EffectType::Damage);
        let attrs = StatBlock::neutral();
        // Roll offset 2 → value 6.
        let outcome =
            EffectEngine::process_instant_effect(&effect, &attrs, 2, &mut SequenceRng::new([2]))
                .unwrap();
        assert_eq!(outcome.damage, Some(4));
        assert_eq!(outcome.healing, None);
        assert_eq!(outcome.description, "Test deals 4 damage");

        let outcome =
            EffectEngine::process_instant_effect(&effect, &attrs, 50, &mut SequenceRng::new([2]))
                .unwrap();
        assert_eq!(outcome.damage, Some(1));
    }

    #[test]
    fn instant_heal_ignores_defense() {
        let effect = def(EffectType::Heal);
        let outcome = EffectEngine::process_instant_effect(
            &effect,
            &StatBlock::neutral(),
            50,
            &mut SequenceRng::new([4]),
        )
        .unwrap();
        assert_eq!(outcome.healing, Some(8));
        assert_eq!(outcome.damage, None);
    }

    #[test]
    fn drain_heals_floored_share_of_damage() {
        let effect = AbilityEffectDef {
            drain_percent: 0.5,
            ..def(EffectType::Drain)
        };
        // value 8, defense 1 → damage 7 → healing 3
        let outcome = EffectEngine::process_instant_effect(
            &effect,
            &StatBlock::neutral(),
            1,
            &mut SequenceRng::new([4]),
        )
        .unwrap();
        assert_eq!(outcome.damage, Some(7));
        assert_eq!(outcome.healing, Some(3));
    }

    #[test]
    fn lingering_definitions_are_not_instant() {
        let effect = AbilityEffectDef {
            duration: 5,
            stat_affected: Some(Stat::Strength),
            ..def(EffectType::Buff)
        };
        assert!(
            EffectEngine::process_instant_effect(
                &effect,
                &StatBlock::neutral(),
                0,
                &mut SequenceRng::lowest()
            )
            .is_none()
        );
    }
}
