//! One combat round, end to end.

use crate::effects::{EffectEngine, EffectSet, StackOutcome};
use crate::env::{CombatEnv, RngOracle};
use crate::loot::LootResolver;
use crate::state::{
    Ability, AbilityId, AbilityKind, Character, CombatSession, Enemy, Equipment, Inventory,
    SessionStatus, Side, Timestamp,
};
use crate::stats::{ProgressionCalculator, Stat, StatBlock, StatResolver};

use super::damage::{
    apply_damage, apply_healing, roll_enemy_damage, roll_weapon_damage, weapon_profile,
};
use super::error::CombatError;
use super::leveling::gain_experience;
use super::result::{RoundOutcome, RoundResult, VictoryRewards};

/// Everything the caller hydrates for one round.
#[derive(Clone, Copy, Debug)]
pub struct RoundInput<'r> {
    pub session: &'r CombatSession,
    pub character: &'r Character,
    pub equipment: &'r Equipment,
    pub inventory: &'r Inventory,
    pub ability: Option<AbilityId>,
    pub now: Timestamp,
}

/// Orchestrates combat rounds and session effect ticks.
///
/// Stateless apart from the borrowed content; every call takes the current
/// records and returns updated copies.
#[derive(Clone, Copy, Debug)]
pub struct CombatResolver<'a> {
    env: CombatEnv<'a>,
}

impl<'a> CombatResolver<'a> {
    pub fn new(env: CombatEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &CombatEnv<'a> {
        &self.env
    }

    /// Resolve one round: the character acts, then the enemy if it survived.
    ///
    /// Every reference is resolved before anything is mutated, so an error
    /// leaves the input records untouched.
    pub fn process_round(
        &self,
        input: RoundInput<'_>,
        rng: &mut impl RngOracle,
    ) -> Result<RoundResult, CombatError> {
        let enemy = self.validate(input.session, input.character)?;
        let ability = input
            .ability
            .map(|id| {
                self.env
                    .abilities
                    .ability(id)
                    .ok_or(CombatError::AbilityNotFound { ability: id })
            })
            .transpose()?;

        let mut session = input.session.clone();
        let mut character = input.character.clone();
        let mut inventory = input.inventory.clone();
        let mut log = Vec::new();

        let effective = attacker_stats(&character, input.equipment, &session.effects);
        let max_health = ProgressionCalculator::max_health(character.level, effective.constitution);
        let enemy_name = enemy.name();
        character.health = session.character_health.min(max_health);
        session.enemy_health = session.enemy_health.min(enemy.stats().max_health);

        // 1-2. Weapon roll plus strength.
        let weapon = weapon_profile(input.equipment, self.env.config);
        let mut damage = roll_weapon_damage(weapon, effective.strength, rng);

        // 3. Ability, only when affordable.
        if let Some(ability) = ability
            && ability.can_afford(character.mana)
        {
            character.mana -= ability.mana_cost;
            damage = damage.saturating_add(self.cast(
                ability,
                &mut character,
                &mut session,
                &effective,
                max_health,
                enemy,
                input.now,
                rng,
                &mut log,
            ));
        }

        // 4.
        session.enemy_health = apply_damage(session.enemy_health, damage);
        log.push(format!("You hit {enemy_name} for {damage} damage."));
        session.round += 1;

        // 5.
        if session.enemy_health == 0 {
            let rewards =
                self.victory(enemy, &mut character, &mut inventory, &effective, rng, &mut log);
            session.status = SessionStatus::Victory;
            session.character_health = character.health;
            return Ok(RoundResult {
                session,
                character,
                inventory,
                outcome: RoundOutcome::Victory(rewards),
                log,
            });
        }

        // 6.
        let armor = input
            .equipment
            .armor_total
            .saturating_add(effective.defense.max(0) as u32);
        let taken = roll_enemy_damage(enemy.damage_range(), armor, rng);
        character.health = apply_damage(character.health, taken);
        log.push(format!("{enemy_name} hits you for {taken} damage."));

        // 7.
        if character.health == 0 {
            let respawn_health = (u64::from(max_health)
                * u64::from(self.env.config.respawn_health_percent)
                / 100) as u32;
            character.health = respawn_health.min(max_health);
            session.status = SessionStatus::Defeat;
            session.character_health = 0;
            log.push(format!("You were defeated by {enemy_name}."));
            log.push(format!("You recover with {respawn_health} health."));
            if let Some(run) = session.dungeon_run {
                log.push(format!("Dungeon {run} has failed."));
            }
            return Ok(RoundResult {
                outcome: RoundOutcome::Defeat {
                    respawn_health,
                    dungeon_failed: session.dungeon_run,
                },
                session,
                character,
                inventory,
                log,
            });
        }

        // 8.
        session.character_health = character.health;
        Ok(RoundResult {
            outcome: RoundOutcome::Continue {
                character_health: session.character_health,
                enemy_health: session.enemy_health,
            },
            session,
            character,
            inventory,
            log,
        })
    }

    /// Checks shared by rounds and ticks; returns the session's enemy.
    pub(super) fn validate(
        &self,
        session: &CombatSession,
        character: &Character,
    ) -> Result<&'a Enemy, CombatError> {
        if !session.is_active() {
            return Err(CombatError::NotActive {
                session: session.id,
            });
        }
        if session.character_id != character.id {
            return Err(CombatError::SessionMismatch {
                session: session.id,
                expected: session.character_id,
                provided: character.id,
            });
        }
        self.env
            .enemies
            .enemy(session.enemy_id)
            .ok_or(CombatError::EnemyNotFound {
                enemy: session.enemy_id,
            })
    }

    /// Applies a paid-for ability. Returns the extra damage to deal this round.
    #[allow(clippy::too_many_arguments)]
    fn cast(
        &self,
        ability: &Ability,
        character: &mut Character,
        session: &mut CombatSession,
        effective: &StatBlock,
        max_health: u32,
        enemy: &Enemy,
        now: Timestamp,
        rng: &mut impl RngOracle,
        log: &mut Vec<String>,
    ) -> u32 {
        let mut extra = 0u32;
        match ability.kind {
            AbilityKind::Damage { min, max } => {
                let rolled = rng.range(min, max);
                extra = extra.saturating_add(rolled);
                log.push(format!("You cast {} for {rolled} extra damage.", ability.name));
            }
            AbilityKind::Heal { min, max } => {
                let (health, restored) =
                    apply_healing(character.health, rng.range(min, max), max_health);
                character.health = health;
                log.push(format!(
                    "You cast {} and restore {restored} health.",
                    ability.name
                ));
            }
        }

        let enemy_defense = enemy_defense(enemy, &session.effects);
        for def in &ability.effects {
            if def.is_instant() {
                if !EffectEngine::should_trigger(def, rng) {
                    continue;
                }
                let Some(outcome) =
                    EffectEngine::process_instant_effect(def, effective, enemy_defense, rng)
                else {
                    continue;
                };
                if let Some(dealt) = outcome.damage {
                    extra = extra.saturating_add(dealt);
                }
                if let Some(healing) = outcome.healing {
                    character.health = apply_healing(character.health, healing, max_health).0;
                }
                log.push(format!("{}.", outcome.description));
                continue;
            }

            let Some(effect) =
                EffectEngine::create_active_effect(def, &ability.name, effective, now, rng)
            else {
                continue;
            };
            let target = match effect.target {
                Side::Attacker => "you".to_string(),
                Side::Enemy => enemy.name().to_string(),
            };
            let name = effect.name.clone();
            match session.effects.add_or_stack(effect) {
                StackOutcome::Added(_) => log.push(format!("{name} takes hold on {target}.")),
                StackOutcome::Refreshed(_) => log.push(format!("{name} on {target} is refreshed.")),
            }
        }
        extra
    }

    fn victory(
        &self,
        enemy: &Enemy,
        character: &mut Character,
        inventory: &mut Inventory,
        effective: &StatBlock,
        rng: &mut impl RngOracle,
        log: &mut Vec<String>,
    ) -> VictoryRewards {
        let (gold_min, gold_max) = enemy.gold_range();
        let exp_gained = u64::from(enemy.stats().exp_reward);
        let gold_gained = u64::from(rng.range(gold_min, gold_max));
        character.gold = character.gold.saturating_add(gold_gained);
        log.push(format!(
            "You defeated {}! Gained {exp_gained} experience and {gold_gained} gold.",
            enemy.name()
        ));

        let level_up = gain_experience(character, exp_gained, effective, self.env.config);
        if let Some(level_up) = level_up {
            log.push(format!(
                "You reached level {} and gained {} stat points.",
                level_up.to_level, level_up.points_gained
            ));
        }

        let loot = LootResolver::roll(self.env.loot.loot_table(enemy.id()), rng);
        LootResolver::grant(&loot, inventory, self.env.items);
        for drop in &loot {
            let name = self
                .env
                .items
                .definition(drop.item)
                .map_or_else(|| drop.item.to_string(), |def| def.name.clone());
            log.push(format!("Looted {name} x{}.", drop.quantity));
        }

        VictoryRewards {
            exp_gained,
            gold_gained,
            loot,
            level_up,
            named_defeat: match enemy {
                Enemy::Named(named) => Some(named.id),
                Enemy::Regular(_) => None,
            },
        }
    }
}

/// Effective attributes of the attacker: base, equipment, then effects.
pub fn attacker_stats(character: &Character, equipment: &Equipment, effects: &EffectSet) -> StatBlock {
    StatResolver::effective_stats(
        &character.attributes,
        &equipment.bonuses,
        &effects.stat_totals(Side::Attacker),
    )
}

/// Enemy defense after enemy-side defense modifiers, floored at 0.
pub fn enemy_defense(enemy: &Enemy, effects: &EffectSet) -> u32 {
    let modifier = effects.total_stat_modifier(Side::Enemy, Stat::Defense);
    (i64::from(enemy.stats().defense) + i64::from(modifier)).max(0) as u32
}
