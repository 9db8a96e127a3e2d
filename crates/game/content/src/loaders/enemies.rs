//! Mob and named-mob catalog loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{Enemy, EnemyId, Mob, MobStats, NamedMob};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Enemy catalog structure for RON files.
///
/// Regular and named mobs live in separate lists; both become [`Enemy`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyCatalog {
    pub mobs: Vec<Mob>,
    pub named_mobs: Vec<NamedMob>,
}

/// Loader for enemy catalogs from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load every enemy template from a RON file.
    ///
    /// Rejects duplicate ids, inverted damage or gold ranges, and aggro
    /// chances outside `[0, 1]`.
    pub fn load(path: &Path) -> LoadResult<Vec<Enemy>> {
        let catalog: EnemyCatalog = read_ron(path, "enemy catalog")?;

        let enemies: Vec<Enemy> = catalog
            .mobs
            .into_iter()
            .map(Enemy::Regular)
            .chain(catalog.named_mobs.into_iter().map(Enemy::Named))
            .collect();

        let mut seen: HashSet<EnemyId> = HashSet::new();
        for enemy in &enemies {
            if !seen.insert(enemy.id()) {
                anyhow::bail!("Duplicate {} in {}", enemy.id(), path.display());
            }
            Self::validate(enemy.stats())
                .map_err(|e| anyhow::anyhow!("Invalid {} in {}: {}", enemy.id(), path.display(), e))?;
            if let Enemy::Regular(mob) = enemy
                && !(0.0..=1.0).contains(&mob.aggro_chance)
            {
                anyhow::bail!(
                    "Invalid {} in {}: aggro_chance {} is outside [0, 1]",
                    mob.id,
                    path.display(),
                    mob.aggro_chance
                );
            }
        }

        Ok(enemies)
    }

    fn validate(stats: &MobStats) -> LoadResult<()> {
        if stats.max_health == 0 {
            anyhow::bail!("max_health must be positive");
        }
        if stats.damage_min > stats.damage_max {
            anyhow::bail!(
                "damage range {}..{} is inverted",
                stats.damage_min,
                stats.damage_max
            );
        }
        if stats.gold_min > stats.gold_max {
            anyhow::bail!("gold range {}..{} is inverted", stats.gold_min, stats.gold_max);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{MobId, NamedMobId};

    const CATALOG: &str = r#"(
        mobs: [
            (
                id: MobId(1),
                stats: (
                    name: "Goblin",
                    level: 1,
                    max_health: 30,
                    damage_min: 2,
                    damage_max: 5,
                    defense: 1,
                    attack_speed: 2,
                    exp_reward: 40,
                    gold_min: 3,
                    gold_max: 8,
                ),
                aggro_chance: 0.4,
            ),
        ],
        named_mobs: [
            (
                id: NamedMobId(1),
                title: "the Unbroken",
                stats: (
                    name: "Gruk",
                    level: 5,
                    max_health: 220,
                    damage_min: 9,
                    damage_max: 14,
                    defense: 6,
                    attack_speed: 3,
                    exp_reward: 400,
                    gold_min: 50,
                    gold_max: 90,
                ),
            ),
        ],
    )"#;

    fn write(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enemies.ron");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_regular_and_named_mobs() {
        let (_dir, path) = write(CATALOG);
        let enemies = EnemyLoader::load(&path).unwrap();
        assert_eq!(enemies.len(), 2);
        assert_eq!(enemies[0].id(), EnemyId::Regular(MobId(1)));
        assert_eq!(enemies[1].id(), EnemyId::Named(NamedMobId(1)));
        assert!(enemies[1].is_named());
        assert_eq!(enemies[1].damage_range(), (9, 14));
    }

    #[test]
    fn inverted_damage_range_is_rejected() {
        let (_dir, path) = write(&CATALOG.replace("damage_min: 2", "damage_min: 7"));
        let err = EnemyLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("mob#1"));
        assert!(err.to_string().contains("enemies.ron"));
    }

    #[test]
    fn aggro_chance_must_be_a_probability() {
        let (_dir, path) = write(&CATALOG.replace("aggro_chance: 0.4", "aggro_chance: 1.5"));
        assert!(EnemyLoader::load(&path).is_err());
    }
}
