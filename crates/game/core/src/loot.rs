//! Loot rolling on enemy defeat.
//!
//! Every table row is rolled independently: a uniform sample in `[0, 1)`
//! below `drop_chance` drops a quantity uniform in `[quantity_min, quantity_max]`.

use crate::env::{ItemOracle, LootEntry, RngOracle};
use crate::state::{Inventory, ItemId};

/// One granted item stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDrop {
    pub item: ItemId,
    pub quantity: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LootResolver;

impl LootResolver {
    /// Roll every row of `table`; an empty result is a normal outcome.
    pub fn roll(table: &[LootEntry], rng: &mut impl RngOracle) -> Vec<LootDrop> {
        table
            .iter()
            .filter_map(|row| {
                if rng.roll_unit() >= row.drop_chance {
                    return None;
                }
                let quantity = rng.range(row.quantity_min, row.quantity_max);
                (quantity > 0).then_some(LootDrop {
                    item: row.item,
                    quantity,
                })
            })
            .collect()
    }

    /// Merge drops into `inventory`, stacking where the item allows it.
    pub fn grant(drops: &[LootDrop], inventory: &mut Inventory, items: &dyn ItemOracle) {
        for drop in drops {
            inventory.add(drop.item, drop.quantity, items.is_stackable(drop.item));
        }
    }
}
