use crate::state::{EnemyId, ItemId};

/// Oracle providing loot tables keyed by enemy.
pub trait LootOracle: Send + Sync {
    /// Rows of the enemy's loot table; empty when it drops nothing.
    fn loot_table(&self, enemy: EnemyId) -> &[LootEntry];
}

/// One independently rolled row of a loot table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: ItemId,
    /// Probability in `[0, 1]` that this row drops.
    pub drop_chance: f64,
    pub quantity_min: u32,
    pub quantity_max: u32,
}

impl LootEntry {
    pub const fn new(item: ItemId, drop_chance: f64, quantity_min: u32, quantity_max: u32) -> Self {
        Self {
            item,
            drop_chance,
            quantity_min,
            quantity_max,
        }
    }
}
