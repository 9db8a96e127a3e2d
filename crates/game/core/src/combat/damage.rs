//! Damage calculation and application.

use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::state::{Equipment, WeaponProfile};

// ============================================================================
// Attacker Damage
// ============================================================================

/// Strength bonus added to every weapon roll.
///
/// Formula: `floor((STR - 10) / 2)`, rounding toward negative infinity.
pub fn strength_modifier(strength: i32) -> i32 {
    (strength - CombatConfig::NEUTRAL_STAT).div_euclid(2)
}

/// Weapon damage range, falling back to the configured unarmed range.
pub fn weapon_profile(equipment: &Equipment, config: &CombatConfig) -> WeaponProfile {
    equipment.weapon.unwrap_or(WeaponProfile::new(
        config.default_weapon_min,
        config.default_weapon_max,
    ))
}

/// Roll the attacker's pre-ability damage.
///
/// # Formula
///
/// ```text
/// damage = max(uniform[weapon_min, weapon_max] + floor((STR - 10) / 2), 0)
/// ```
pub fn roll_weapon_damage(
    weapon: WeaponProfile,
    strength: i32,
    rng: &mut impl RngOracle,
) -> u32 {
    let roll = rng.range(weapon.damage_min, weapon.damage_max);
    (i64::from(roll) + i64::from(strength_modifier(strength))).max(0) as u32
}

// ============================================================================
// Enemy Damage
// ============================================================================

/// Damage dealt to the attacker after armor.
///
/// Formula: `max(raw - armor_total, 1)`
pub fn mitigate_with_armor(raw: u32, armor_total: u32) -> u32 {
    raw.saturating_sub(armor_total).max(1)
}

/// Roll enemy damage in `[min, max]` and mitigate it by the attacker's armor.
pub fn roll_enemy_damage(
    damage_range: (u32, u32),
    armor_total: u32,
    rng: &mut impl RngOracle,
) -> u32 {
    let raw = rng.range(damage_range.0, damage_range.1);
    mitigate_with_armor(raw, armor_total)
}

/// Apply damage to current HP.
///
/// Returns the new HP value (clamped to 0).
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

/// Apply healing to current HP.
///
/// Returns the new HP value (clamped to `max_hp`) and the amount actually restored.
pub fn apply_healing(current_hp: u32, healing: u32, max_hp: u32) -> (u32, u32) {
    let new_hp = current_hp.saturating_add(healing).min(max_hp).max(current_hp.min(max_hp));
    (new_hp, new_hp.saturating_sub(current_hp))
}
