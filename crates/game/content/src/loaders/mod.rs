//! Content loaders for reading combat data from files.
//!
//! Every loader returns [`LoadResult`]; error messages always name the file
//! that failed to read or parse.

pub mod abilities;
pub mod config;
pub mod enemies;
pub mod factory;
pub mod item;
pub mod loot;

pub use abilities::{AbilityLoader, AbilitySpec, EffectLoader};
pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use loot::{LootTableLoader, LootTableSpec};

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Read and deserialize a RON file.
pub(crate) fn read_ron<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON {}: {}", what, path.display(), e))
}
