//! Repository contract for combat records.

use async_trait::async_trait;

use combat_core::{Character, CharacterId, CombatSession, DungeonRunId, Equipment, Inventory};

use super::error::Result;
use super::types::{DungeonRun, NamedDefeat};

/// Persistence for every record the combat service reads or writes.
///
/// The service loads fully hydrated records before calling the resolvers and
/// writes the returned records afterwards; implementations never see partial
/// rounds.
#[async_trait]
pub trait CombatRepository: Send + Sync {
    async fn load_character(&self, id: CharacterId) -> Result<Option<Character>>;

    async fn save_character(&self, character: &Character) -> Result<()>;

    /// Equipped weapon, armor and stat bonuses; nothing equipped by default.
    async fn load_equipment(&self, id: CharacterId) -> Result<Equipment>;

    async fn save_equipment(&self, id: CharacterId, equipment: &Equipment) -> Result<()>;

    /// Inventory contents; empty by default.
    async fn load_inventory(&self, id: CharacterId) -> Result<Inventory>;

    async fn save_inventory(&self, id: CharacterId, inventory: &Inventory) -> Result<()>;

    /// The character's active session, if any.
    async fn active_session(&self, id: CharacterId) -> Result<Option<CombatSession>>;

    /// Store a session. Ended sessions stop being reported as active.
    async fn save_session(&self, session: &CombatSession) -> Result<()>;

    /// Store the records a round or effect tick produced in one write.
    ///
    /// Either all of them are stored or none is, so a failed write can never
    /// leave rewards on the character while the session is still active.
    /// `inventory` is `None` when it did not change.
    async fn save_combat(
        &self,
        character: &Character,
        session: &CombatSession,
        inventory: Option<&Inventory>,
    ) -> Result<()>;

    /// Characters that currently have an active session.
    async fn characters_in_combat(&self) -> Result<Vec<CharacterId>>;

    async fn active_dungeon_run(&self, id: CharacterId) -> Result<Option<DungeonRun>>;

    async fn load_dungeon_run(&self, id: DungeonRunId) -> Result<Option<DungeonRun>>;

    async fn save_dungeon_run(&self, run: &DungeonRun) -> Result<()>;

    async fn record_named_defeat(&self, defeat: NamedDefeat) -> Result<()>;

    async fn named_defeats(&self, id: CharacterId) -> Result<Vec<NamedDefeat>>;
}
