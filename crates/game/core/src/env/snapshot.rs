//! In-memory content snapshot implementing every read-only oracle.
//!
//! Hosts load definitions once (see the content crate), freeze them into a
//! [`ContentSnapshot`], and share it for the lifetime of the process.

use std::collections::HashMap;

use crate::state::{Ability, AbilityId, Enemy, EnemyId, ItemId};

use super::actors::{AbilityOracle, EnemyOracle};
use super::items::{ItemDefinition, ItemOracle};
use super::tables::{LootEntry, LootOracle};

#[derive(Clone, Debug, Default)]
pub struct ContentSnapshot {
    enemies: HashMap<EnemyId, Enemy>,
    abilities: HashMap<AbilityId, Ability>,
    items: HashMap<ItemId, ItemDefinition>,
    loot: HashMap<EnemyId, Vec<LootEntry>>,
}

impl ContentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enemy, replacing any previous template with the same id.
    pub fn insert_enemy(&mut self, enemy: Enemy) {
        self.enemies.insert(enemy.id(), enemy);
    }

    pub fn insert_ability(&mut self, ability: Ability) {
        self.abilities.insert(ability.id, ability);
    }

    pub fn insert_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.id, item);
    }

    /// Appends rows to an enemy's loot table.
    pub fn extend_loot(&mut self, enemy: EnemyId, rows: impl IntoIterator<Item = LootEntry>) {
        self.loot.entry(enemy).or_default().extend(rows);
    }

    #[must_use]
    pub fn with_enemy(mut self, enemy: Enemy) -> Self {
        self.insert_enemy(enemy);
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.insert_ability(ability);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.insert_item(item);
        self
    }

    #[must_use]
    pub fn with_loot(mut self, enemy: EnemyId, rows: impl IntoIterator<Item = LootEntry>) -> Self {
        self.extend_loot(enemy, rows);
        self
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl EnemyOracle for ContentSnapshot {
    fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }
}

impl AbilityOracle for ContentSnapshot {
    fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.get(&id)
    }
}

impl ItemOracle for ContentSnapshot {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }
}

impl LootOracle for ContentSnapshot {
    fn loot_table(&self, enemy: EnemyId) -> &[LootEntry] {
        self.loot.get(&enemy).map(Vec::as_slice).unwrap_or(&[])
    }
}
