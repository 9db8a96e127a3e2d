//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    /// Parse config from a TOML string.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)?;
        if config.default_weapon_min > config.default_weapon_max {
            anyhow::bail!(
                "default_weapon_min ({}) exceeds default_weapon_max ({})",
                config.default_weapon_min,
                config.default_weapon_max
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("xp_per_level = 100\nstarting_gold = 25\n").unwrap();
        assert_eq!(config.xp_per_level, 100);
        assert_eq!(config.starting_gold, 25);
        assert_eq!(config.points_per_level, CombatConfig::DEFAULT_POINTS_PER_LEVEL);
        assert_eq!(config.respawn_health_percent, 50);
    }

    #[test]
    fn inverted_weapon_range_is_rejected() {
        let err = ConfigLoader::parse("default_weapon_min = 5\ndefault_weapon_max = 2\n")
            .unwrap_err();
        assert!(err.to_string().contains("default_weapon_min"));
    }

    #[test]
    fn load_names_the_file_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "xp_per_level = \"lots\"").unwrap();
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
