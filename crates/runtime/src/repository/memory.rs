//! In-memory implementation of [`CombatRepository`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use combat_core::{Character, CharacterId, CombatSession, DungeonRunId, Equipment, Inventory};

use super::error::Result;
use super::traits::CombatRepository;
use super::types::{DungeonRun, NamedDefeat};

#[derive(Default)]
struct Tables {
    characters: HashMap<CharacterId, Character>,
    equipment: HashMap<CharacterId, Equipment>,
    inventories: HashMap<CharacterId, Inventory>,
    /// Latest session per character; only one can be active at a time.
    sessions: HashMap<CharacterId, CombatSession>,
    dungeon_runs: HashMap<DungeonRunId, DungeonRun>,
    named_defeats: Vec<NamedDefeat>,
}

/// Repository backed by hash maps, for tests and single-process hosts.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CombatRepository for InMemoryRepository {
    async fn load_character(&self, id: CharacterId) -> Result<Option<Character>> {
        Ok(self.tables.read().await.characters.get(&id).cloned())
    }

    async fn save_character(&self, character: &Character) -> Result<()> {
        self.tables
            .write()
            .await
            .characters
            .insert(character.id, character.clone());
        Ok(())
    }

    async fn load_equipment(&self, id: CharacterId) -> Result<Equipment> {
        Ok(self
            .tables
            .read()
            .await
            .equipment
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_equipment(&self, id: CharacterId, equipment: &Equipment) -> Result<()> {
        self.tables
            .write()
            .await
            .equipment
            .insert(id, equipment.clone());
        Ok(())
    }

    async fn load_inventory(&self, id: CharacterId) -> Result<Inventory> {
        Ok(self
            .tables
            .read()
            .await
            .inventories
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_inventory(&self, id: CharacterId, inventory: &Inventory) -> Result<()> {
        self.tables
            .write()
            .await
            .inventories
            .insert(id, inventory.clone());
        Ok(())
    }

    async fn active_session(&self, id: CharacterId) -> Result<Option<CombatSession>> {
        Ok(self
            .tables
            .read()
            .await
            .sessions
            .get(&id)
            .filter(|session| session.is_active())
            .cloned())
    }

    async fn save_session(&self, session: &CombatSession) -> Result<()> {
        self.tables
            .write()
            .await
            .sessions
            .insert(session.character_id, session.clone());
        Ok(())
    }

    async fn save_combat(
        &self,
        character: &Character,
        session: &CombatSession,
        inventory: Option<&Inventory>,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.characters.insert(character.id, character.clone());
        tables
            .sessions
            .insert(session.character_id, session.clone());
        if let Some(inventory) = inventory {
            tables.inventories.insert(character.id, inventory.clone());
        }
        Ok(())
    }

    async fn characters_in_combat(&self) -> Result<Vec<CharacterId>> {
        let tables = self.tables.read().await;
        let mut ids: Vec<CharacterId> = tables
            .sessions
            .values()
            .filter(|session| session.is_active())
            .map(|session| session.character_id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn active_dungeon_run(&self, id: CharacterId) -> Result<Option<DungeonRun>> {
        Ok(self
            .tables
            .read()
            .await
            .dungeon_runs
            .values()
            .find(|run| run.character == id && run.is_active())
            .cloned())
    }

    async fn load_dungeon_run(&self, id: DungeonRunId) -> Result<Option<DungeonRun>> {
        Ok(self.tables.read().await.dungeon_runs.get(&id).cloned())
    }

    async fn save_dungeon_run(&self, run: &DungeonRun) -> Result<()> {
        self.tables
            .write()
            .await
            .dungeon_runs
            .insert(run.id, run.clone());
        Ok(())
    }

    async fn record_named_defeat(&self, defeat: NamedDefeat) -> Result<()> {
        self.tables.write().await.named_defeats.push(defeat);
        Ok(())
    }

    async fn named_defeats(&self, id: CharacterId) -> Result<Vec<NamedDefeat>> {
        Ok(self
            .tables
            .read()
            .await
            .named_defeats
            .iter()
            .filter(|defeat| defeat.character == id)
            .copied()
            .collect())
    }
}
