//! Character inventory.
//!
//! Only the merge rule matters to combat: stackable items merge into an
//! existing stack, everything else takes one entry per unit.

use super::common::ItemId;

/// Inventory entry containing an item and its quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryEntry {
    pub item: ItemId,
    pub quantity: u32,
}

impl InventoryEntry {
    pub fn new(item: ItemId, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `item`.
    pub fn add(&mut self, item: ItemId, quantity: u32, stackable: bool) {
        if quantity == 0 {
            return;
        }
        if stackable {
            match self.entries.iter_mut().find(|e| e.item == item) {
                Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
                None => self.entries.push(InventoryEntry::new(item, quantity)),
            }
        } else {
            self.entries
                .extend((0..quantity).map(|_| InventoryEntry::new(item, 1)));
        }
    }

    /// Total units of `item` across all entries.
    pub fn quantity_of(&self, item: ItemId) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.item == item)
            .map(|e| e.quantity)
            .sum()
    }
}
