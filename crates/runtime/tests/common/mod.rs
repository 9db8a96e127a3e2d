//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use tokio::sync::Notify;

use combat_core::{
    Ability, AbilityEffectDef, AbilityId, AbilityKind, Character, CharacterId, CombatConfig,
    CombatSession, ContentSnapshot, DungeonRunId, EffectType, Enemy, EnemyId, Equipment,
    Inventory, ItemDefinition, ItemId, LootEntry, Mob, MobId, MobStats, NamedMob, NamedMobId,
    SequenceRng, Side,
};
use combat_runtime::repository::{
    CombatRepository, DungeonRun, NamedDefeat, RepositoryError,
};
use combat_runtime::{CombatService, InMemoryRepository};

pub const RAT: EnemyId = EnemyId::Regular(MobId(1));
pub const OGRE: EnemyId = EnemyId::Regular(MobId(2));
pub const GOBLIN: EnemyId = EnemyId::Regular(MobId(3));
pub const GRUK: EnemyId = EnemyId::Named(NamedMobId(7));

pub const RAT_TAIL: ItemId = ItemId(1);
pub const POISON_STRIKE: AbilityId = AbilityId(1);

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness; `RUST_LOG` filters it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn stats(name: &str, max_health: u32, damage: u32, defense: u32, exp_reward: u32) -> MobStats {
    MobStats {
        name: name.to_string(),
        level: 1,
        max_health,
        damage_min: damage,
        damage_max: damage,
        defense,
        attack_speed: 2,
        exp_reward,
        gold_min: 5,
        gold_max: 10,
    }
}

pub fn content() -> ContentSnapshot {
    let poison = AbilityEffectDef {
        name: "Poison".to_string(),
        effect_type: EffectType::Damage,
        target: Side::Enemy,
        chance: 1.0,
        is_periodic: true,
        tick_interval: 2,
        tick_count: 3,
        tick_value: Some(4),
        ..AbilityEffectDef::default()
    };

    ContentSnapshot::new()
        .with_enemy(Enemy::Regular(Mob {
            id: MobId(1),
            stats: stats("Rat", 1, 1, 0, 40),
            aggro_chance: 1.0,
        }))
        .with_enemy(Enemy::Regular(Mob {
            id: MobId(2),
            stats: stats("Ogre", 500, 100, 0, 90),
            aggro_chance: 0.0,
        }))
        .with_enemy(Enemy::Regular(Mob {
            id: MobId(3),
            stats: stats("Goblin", 30, 5, 2, 40),
            aggro_chance: 0.5,
        }))
        .with_enemy(Enemy::Named(NamedMob {
            id: NamedMobId(7),
            title: "the Unbroken".to_string(),
            stats: stats("Gruk", 1, 1, 0, 300),
        }))
        .with_ability(Ability {
            id: POISON_STRIKE,
            name: "Poison Strike".to_string(),
            mana_cost: 5,
            kind: AbilityKind::Damage { min: 0, max: 0 },
            effects: vec![poison],
        })
        .with_item(ItemDefinition::new(RAT_TAIL, "Rat Tail", true))
        .with_loot(RAT, [LootEntry::new(RAT_TAIL, 1.0, 1, 1)])
}

/// Service over an in-memory repository that always rolls the minimum.
pub fn service_with(config: CombatConfig) -> Arc<CombatService> {
    init_tracing();
    Arc::new(
        CombatService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(content()),
            config,
        )
        .with_rng(SequenceRng::lowest()),
    )
}

/// Like [`service`], over a caller-held repository.
pub fn service_over(repo: Arc<dyn CombatRepository>) -> Arc<CombatService> {
    init_tracing();
    Arc::new(
        CombatService::new(repo, Arc::new(content()), CombatConfig::default())
            .with_rng(SequenceRng::lowest()),
    )
}

pub fn service() -> Arc<CombatService> {
    service_with(CombatConfig::default())
}

/// Repository that can park the next `active_session` call until released,
/// or reject combat writes.
#[derive(Default)]
pub struct GatedRepository {
    inner: InMemoryRepository,
    pub armed: AtomicBool,
    pub entered: Notify,
    pub release: Notify,
    /// Makes every `save_combat` fail.
    pub fail_combat_saves: AtomicBool,
}

type RepoResult<T> = combat_runtime::repository::Result<T>;

#[async_trait]
impl CombatRepository for GatedRepository {
    async fn load_character(&self, id: CharacterId) -> RepoResult<Option<Character>> {
        self.inner.load_character(id).await
    }

    async fn save_character(&self, character: &Character) -> RepoResult<()> {
        self.inner.save_character(character).await
    }

    async fn load_equipment(&self, id: CharacterId) -> RepoResult<Equipment> {
        self.inner.load_equipment(id).await
    }

    async fn save_equipment(&self, id: CharacterId, equipment: &Equipment) -> RepoResult<()> {
        self.inner.save_equipment(id, equipment).await
    }

    async fn load_inventory(&self, id: CharacterId) -> RepoResult<Inventory> {
        self.inner.load_inventory(id).await
    }

    async fn save_inventory(&self, id: CharacterId, inventory: &Inventory) -> RepoResult<()> {
        self.inner.save_inventory(id, inventory).await
    }

    async fn active_session(&self, id: CharacterId) -> RepoResult<Option<CombatSession>> {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.active_session(id).await
    }

    async fn save_session(&self, session: &CombatSession) -> RepoResult<()> {
        self.inner.save_session(session).await
    }

    async fn save_combat(
        &self,
        character: &Character,
        session: &CombatSession,
        inventory: Option<&Inventory>,
    ) -> RepoResult<()> {
        if self.fail_combat_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Backend("write rejected".to_string()));
        }
        self.inner.save_combat(character, session, inventory).await
    }

    async fn characters_in_combat(&self) -> RepoResult<Vec<CharacterId>> {
        self.inner.characters_in_combat().await
    }

    async fn active_dungeon_run(&self, id: CharacterId) -> RepoResult<Option<DungeonRun>> {
        self.inner.active_dungeon_run(id).await
    }

    async fn load_dungeon_run(&self, id: DungeonRunId) -> RepoResult<Option<DungeonRun>> {
        self.inner.load_dungeon_run(id).await
    }

    async fn save_dungeon_run(&self, run: &DungeonRun) -> RepoResult<()> {
        self.inner.save_dungeon_run(run).await
    }

    async fn record_named_defeat(&self, defeat: NamedDefeat) -> RepoResult<()> {
        self.inner.record_named_defeat(defeat).await
    }

    async fn named_defeats(&self, id: CharacterId) -> RepoResult<Vec<NamedDefeat>> {
        self.inner.named_defeats(id).await
    }
}
