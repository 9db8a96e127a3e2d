//! Loot table loader.

use std::path::Path;

use combat_core::{EnemyId, LootEntry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// One enemy's loot table as written in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootTableSpec {
    pub enemy: EnemyId,
    pub entries: Vec<LootEntry>,
}

/// Loot catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootCatalog {
    pub tables: Vec<LootTableSpec>,
}

/// Loader for loot tables from RON files.
pub struct LootTableLoader;

impl LootTableLoader {
    /// Load every loot table.
    ///
    /// Rows need a drop chance in `[0, 1]` and a non-inverted quantity range.
    /// Several tables for the same enemy are allowed and concatenate.
    pub fn load(path: &Path) -> LoadResult<Vec<LootTableSpec>> {
        let catalog: LootCatalog = read_ron(path, "loot catalog")?;

        for table in &catalog.tables {
            for row in &table.entries {
                if !(0.0..=1.0).contains(&row.drop_chance) {
                    anyhow::bail!(
                        "Loot row for {} in {} has drop_chance {} outside [0, 1]",
                        row.item,
                        path.display(),
                        row.drop_chance
                    );
                }
                if row.quantity_min > row.quantity_max {
                    anyhow::bail!(
                        "Loot row for {} in {} has inverted quantity {}..{}",
                        row.item,
                        path.display(),
                        row.quantity_min,
                        row.quantity_max
                    );
                }
            }
        }

        Ok(catalog.tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ItemId, MobId};

    #[test]
    fn loads_tables_keyed_by_enemy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loot.ron");
        std::fs::write(
            &path,
            r#"(
                tables: [
                    (
                        enemy: Regular(MobId(1)),
                        entries: [
                            (item: ItemId(1), drop_chance: 0.5, quantity_min: 1, quantity_max: 3),
                            (item: ItemId(2), drop_chance: 0.05, quantity_min: 1, quantity_max: 1),
                        ],
                    ),
                ],
            )"#,
        )
        .unwrap();

        let tables = LootTableLoader::load(&path).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].enemy, EnemyId::Regular(MobId(1)));
        assert_eq!(tables[0].entries[1].item, ItemId(2));
    }

    #[test]
    fn inverted_quantity_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loot.ron");
        std::fs::write(
            &path,
            r#"(tables: [(enemy: Regular(MobId(1)), entries: [
                (item: ItemId(3), drop_chance: 1.0, quantity_min: 4, quantity_max: 2),
            ])])"#,
        )
        .unwrap();
        let err = LootTableLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("item#3"));
    }
}
