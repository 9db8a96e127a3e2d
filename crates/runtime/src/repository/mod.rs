//! Repository layer for mutable combat records.
//!
//! Repositories hold data that CHANGES during play:
//! - Characters, equipment and inventories
//! - Combat sessions and dungeon runs
//! - Named-mob defeat history
//!
//! Static content (enemies, abilities, items, loot tables) comes from
//! [`combat_core::ContentSnapshot`], not from repositories.

mod error;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryRepository;
pub use traits::CombatRepository;
pub use types::{DungeonRun, DungeonStatus, NamedDefeat};
