//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use combat_core::{
    Ability, CombatConfig, ContentSnapshot, Enemy, EnemyOracle, ItemDefinition, ItemId,
};

use crate::loaders::{
    AbilityLoader, ConfigLoader, EffectLoader, EnemyLoader, ItemLoader, LoadResult,
    LootTableLoader, LootTableSpec,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── effects.ron
/// ├── abilities.ron
/// ├── enemies.ron
/// ├── items.ron
/// └── loot.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load abilities from `abilities.ron`, resolving effects from `effects.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<Ability>> {
        let effects = EffectLoader::load(&self.data_dir.join("effects.ron"))?;
        AbilityLoader::load(&self.data_dir.join("abilities.ron"), &effects)
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<Enemy>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load loot tables from `loot.ron`.
    pub fn load_loot(&self) -> LoadResult<Vec<LootTableSpec>> {
        LootTableLoader::load(&self.data_dir.join("loot.ron"))
    }

    /// Load every catalog into one snapshot.
    ///
    /// Loot rows must reference known enemies and items.
    pub fn load_snapshot(&self) -> LoadResult<ContentSnapshot> {
        let mut snapshot = ContentSnapshot::new();
        for enemy in self.load_enemies()? {
            snapshot.insert_enemy(enemy);
        }
        for ability in self.load_abilities()? {
            snapshot.insert_ability(ability);
        }
        let items = self.load_items()?;
        let known_item = |id: ItemId| items.iter().any(|item| item.id == id);

        for table in self.load_loot()? {
            if snapshot.enemy(table.enemy).is_none() {
                anyhow::bail!("Loot table references unknown {}", table.enemy);
            }
            if let Some(row) = table.entries.iter().find(|row| !known_item(row.item)) {
                anyhow::bail!(
                    "Loot table for {} references unknown {}",
                    table.enemy,
                    row.item
                );
            }
            snapshot.extend_loot(table.enemy, table.entries);
        }
        for item in items {
            snapshot.insert_item(item);
        }
        Ok(snapshot)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
