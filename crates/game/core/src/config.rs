/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Level-up threshold factor: a character levels while `xp >= level * xp_per_level`.
    pub xp_per_level: u64,
    /// Stat points granted on each level-up.
    pub points_per_level: u32,
    /// Flat current-health increase granted on each level-up (capped at the new max).
    pub level_up_health_bonus: u32,
    /// Flat current-mana increase granted on each level-up (capped at the new max).
    pub level_up_mana_bonus: u32,
    /// Percentage of max health restored after a defeat.
    pub respawn_health_percent: u32,
    /// Damage range used when no weapon is equipped.
    pub default_weapon_min: u32,
    pub default_weapon_max: u32,
    /// Stat points available to a freshly created character.
    pub starting_stat_points: u32,
    /// Gold carried by a freshly created character.
    pub starting_gold: u64,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Attribute value that contributes neither bonus nor penalty.
    pub const NEUTRAL_STAT: i32 = 10;
    pub const MAX_NAME_LEN: usize = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_XP_PER_LEVEL: u64 = 125;
    pub const DEFAULT_POINTS_PER_LEVEL: u32 = 3;
    pub const DEFAULT_LEVEL_UP_HEALTH_BONUS: u32 = 20;
    pub const DEFAULT_LEVEL_UP_MANA_BONUS: u32 = 20;
    pub const DEFAULT_RESPAWN_HEALTH_PERCENT: u32 = 50;
    pub const DEFAULT_WEAPON_MIN: u32 = 1;
    pub const DEFAULT_WEAPON_MAX: u32 = 3;

    pub fn new() -> Self {
        Self {
            xp_per_level: Self::DEFAULT_XP_PER_LEVEL,
            points_per_level: Self::DEFAULT_POINTS_PER_LEVEL,
            level_up_health_bonus: Self::DEFAULT_LEVEL_UP_HEALTH_BONUS,
            level_up_mana_bonus: Self::DEFAULT_LEVEL_UP_MANA_BONUS,
            respawn_health_percent: Self::DEFAULT_RESPAWN_HEALTH_PERCENT,
            default_weapon_min: Self::DEFAULT_WEAPON_MIN,
            default_weapon_max: Self::DEFAULT_WEAPON_MAX,
            starting_stat_points: 0,
            starting_gold: 0,
        }
    }

    /// Experience required to advance past `level`.
    pub fn xp_threshold(&self, level: u32) -> u64 {
        u64::from(level) * self.xp_per_level
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
