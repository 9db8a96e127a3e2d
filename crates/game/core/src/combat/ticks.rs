//! Effect ticks between rounds.

use crate::effects::ActiveEffectType;
use crate::state::{Character, CombatSession, Equipment, Side, Timestamp};
use crate::stats::ProgressionCalculator;

use super::damage::{apply_damage, apply_healing};
use super::error::CombatError;
use super::result::SessionTick;
use super::round::{CombatResolver, attacker_stats};

impl CombatResolver<'_> {
    /// Advance the session's effects to `now`.
    ///
    /// Damage-over-time lowers the target side's health, heal-over-time
    /// restores it up to that side's maximum. Effects that ran out are
    /// reported as having worn off. A tick never ends the combat on its own;
    /// an enemy brought to 0 here is resolved by the next round.
    pub fn tick_session_effects(
        &self,
        session: &CombatSession,
        character: &Character,
        equipment: &Equipment,
        now: Timestamp,
    ) -> Result<SessionTick, CombatError> {
        let enemy = self.validate(session, character)?;

        let mut session = session.clone();
        let mut character = character.clone();
        let mut log = Vec::new();

        let effective = attacker_stats(&character, equipment, &session.effects);
        let character_max =
            ProgressionCalculator::max_health(character.level, effective.constitution);
        let enemy_max = enemy.stats().max_health;
        let enemy_name = enemy.name();

        let mut character_health = session.character_health.min(character_max);
        let mut enemy_health = session.enemy_health.min(enemy_max);

        let expired = session.effects.update(now, |effect, value| {
            let (health, max, target) = match effect.target {
                Side::Attacker => (&mut character_health, character_max, "you"),
                Side::Enemy => (&mut enemy_health, enemy_max, enemy_name),
            };
            match effect.effect_type() {
                ActiveEffectType::Dot => {
                    *health = apply_damage(*health, value);
                    log.push(format!("{} deals {value} damage to {target}.", effect.name));
                }
                ActiveEffectType::Hot => {
                    let (healed, restored) = apply_healing(*health, value, max);
                    *health = healed;
                    log.push(format!("{} restores {restored} health to {target}.", effect.name));
                }
                _ => {}
            }
        });

        for effect in &expired {
            log.push(format!("{} wore off.", effect.name));
        }

        session.character_health = character_health;
        session.enemy_health = enemy_health;
        character.health = character_health;

        Ok(SessionTick {
            session,
            character,
            log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::effects::{AbilityEffectDef, EffectEngine, EffectType};
    use crate::env::{CombatEnv, ContentSnapshot, SequenceRng};
    use crate::state::types::enemy::fixtures::goblin;
    use crate::state::{CharacterId, SessionId, SessionStatus};
    use crate::stats::{Stat, StatBlock};

    fn setup() -> (Character, CombatSession) {
        let hero = Character::create(
            CharacterId(1),
            "Aria",
            StatBlock::neutral(),
            &CombatConfig::default(),
        )
        .unwrap();
        let session = CombatSession::start(SessionId(1), &hero, &goblin(), None, Timestamp(0));
        (hero, session)
    }

    fn periodic(name: &str, effect_type: EffectType, target: Side, value: u32) -> AbilityEffectDef {
        AbilityEffectDef {
            name: name.to_string(),
            effect_type,
            target,
            is_periodic: true,
            tick_interval: 2,
            tick_count: 3,
            tick_value: Some(value),
            ..AbilityEffectDef::default()
        }
    }

    fn apply(session: &mut CombatSession, def: &AbilityEffectDef) {
        let effect = EffectEngine::create_active_effect(
            def,
            "Test",
            &StatBlock::neutral(),
            Timestamp(0),
            &mut SequenceRng::lowest(),
        )
        .unwrap();
        session.effects.add_or_stack(effect);
    }

    #[test]
    fn dot_ticks_at_two_four_six_then_wears_off() {
        let content = ContentSnapshot::new().with_enemy(goblin());
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(CombatEnv::from_snapshot(&content, &config));
        let (mut hero, mut session) = setup();
        apply(&mut session, &periodic("Poison", EffectType::Damage, Side::Enemy, 4));

        let mut health = Vec::new();
        for now in 1..=7 {
            let tick = resolver
                .tick_session_effects(&session, &hero, &Equipment::none(), Timestamp(now))
                .unwrap();
            session = tick.session;
            hero = tick.character;
            health.push(session.enemy_health);
            if now == 6 {
                assert!(tick.log.iter().any(|line| line == "Poison wore off."));
            }
        }

        assert_eq!(health, vec![30, 26, 26, 22, 22, 18, 18]);
        assert!(session.effects.is_empty());
        assert_eq!(session.status, SessionStatus::Active);
    }

    #[test]
    fn repeated_tick_at_same_time_is_a_no_op() {
        let content = ContentSnapshot::new().with_enemy(goblin());
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(CombatEnv::from_snapshot(&content, &config));
        let (hero, mut session) = setup();
        apply(&mut session, &periodic("Poison", EffectType::Damage, Side::Enemy, 4));

        let first = resolver
            .tick_session_effects(&session, &hero, &Equipment::none(), Timestamp(2))
            .unwrap();
        let second = resolver
            .tick_session_effects(&first.session, &first.character, &Equipment::none(), Timestamp(2))
            .unwrap();
        assert_eq!(second.session, first.session);
        assert!(second.log.is_empty());
    }

    #[test]
    fn stalled_sweep_applies_one_final_tick_then_wears_off() {
        let content = ContentSnapshot::new().with_enemy(goblin());
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(CombatEnv::from_snapshot(&content, &config));
        let (hero, mut session) = setup();
        apply(&mut session, &periodic("Poison", EffectType::Damage, Side::Enemy, 4));

        let tick = resolver
            .tick_session_effects(&session, &hero, &Equipment::none(), Timestamp(20))
            .unwrap();
        assert_eq!(tick.session.enemy_health, 26);
        assert_eq!(
            tick.log,
            vec![
                "Poison deals 4 damage to Goblin.".to_string(),
                "Poison wore off.".to_string(),
            ]
        );
        assert!(tick.session.effects.is_empty());

        let later = resolver
            .tick_session_effects(&tick.session, &tick.character, &Equipment::none(), Timestamp(21))
            .unwrap();
        assert_eq!(later.session.enemy_health, 26);
        assert!(later.log.is_empty());
    }

    #[test]
    fn hot_heals_the_attacker_up_to_max() {
        let content = ContentSnapshot::new().with_enemy(goblin());
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(CombatEnv::from_snapshot(&content, &config));
        let (hero, mut session) = setup();
        session.character_health = 115;
        apply(&mut session, &periodic("Renew", EffectType::Heal, Side::Attacker, 10));

        let tick = resolver
            .tick_session_effects(&session, &hero, &Equipment::none(), Timestamp(2))
            .unwrap();
        assert_eq!(tick.session.character_health, 120);
        assert_eq!(tick.character.health, 120);
        assert_eq!(tick.log, vec!["Renew restores 5 health to you.".to_string()]);
    }

    #[test]
    fn dot_kill_leaves_combat_for_the_next_round() {
        let content = ContentSnapshot::new().with_enemy(goblin());
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(CombatEnv::from_snapshot(&content, &config));
        let (hero, mut session) = setup();
        session.enemy_health = 3;
        apply(&mut session, &periodic("Poison", EffectType::Damage, Side::Enemy, 4));

        let tick = resolver
            .tick_session_effects(&session, &hero, &Equipment::none(), Timestamp(2))
            .unwrap();
        assert_eq!(tick.session.enemy_health, 0);
        assert!(tick.session.is_active());
    }

    #[test]
    fn expired_buffs_are_reported() {
        let content = ContentSnapshot::new().with_enemy(goblin());
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(CombatEnv::from_snapshot(&content, &config));
        let (hero, mut session) = setup();
        let buff = AbilityEffectDef {
            name: "Rally".to_string(),
            effect_type: EffectType::Buff,
            target: Side::Attacker,
            duration: 5,
            stat_affected: Some(Stat::Strength),
            ..AbilityEffectDef::default()
        };
        apply(&mut session, &buff);

        let early = resolver
            .tick_session_effects(&session, &hero, &Equipment::none(), Timestamp(4))
            .unwrap();
        assert_eq!(early.session.effects.len(), 1);

        let late = resolver
            .tick_session_effects(&session, &hero, &Equipment::none(), Timestamp(5))
            .unwrap();
        assert!(late.session.effects.is_empty());
        assert_eq!(late.log, vec!["Rally wore off.".to_string()]);
    }
}
