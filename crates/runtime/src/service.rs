//! Combat service: the imperative shell around the pure resolvers.
//!
//! Every operation follows the same shape: take the character's lock, load
//! fully hydrated records, run the resolver, then persist what it returned.
//! The resolvers never touch the repository.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard, broadcast};
use tracing::{debug, info, warn};

use combat_core::{
    AbilityId, Character, CharacterId, CombatConfig, CombatEnv, CombatError, CombatResolver,
    CombatSession, ContentSnapshot, DungeonId, DungeonRunId, EffectView, EnemyId, EnemyOracle,
    Equipment, RngOracle, RoundInput, RoundOutcome, RoundResult, SessionId, StatBlock, Timestamp,
};

use crate::api::{Result, ServiceError};
use crate::events::{CombatEvent, EffectsEvent, Event, EventBus, Topic};
use crate::repository::{CombatRepository, DungeonRun, DungeonStatus, NamedDefeat};
use crate::rng::{GameClock, StdRngOracle};

/// Result of one effect tick for one character.
#[derive(Debug, Clone, PartialEq)]
pub enum TickResult {
    /// A tick for this character was still running; nothing was touched.
    Skipped,
    /// The character has no active session.
    Idle,
    Ticked {
        log: Vec<String>,
        effects: Vec<EffectView>,
    },
}

/// Monotonic id sources for records the service creates.
struct IdAllocator {
    character: AtomicU32,
    session: AtomicU64,
    dungeon_run: AtomicU64,
}

impl IdAllocator {
    fn new() -> Self {
        Self {
            character: AtomicU32::new(1),
            session: AtomicU64::new(1),
            dungeon_run: AtomicU64::new(1),
        }
    }
}

/// Marks a character as being ticked until dropped.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<CharacterId>>,
    character: CharacterId,
}

impl<'a> InFlight<'a> {
    fn enter(set: &'a Mutex<HashSet<CharacterId>>, character: CharacterId) -> Option<Self> {
        let inserted = set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(character);
        inserted.then_some(Self { set, character })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.character);
    }
}

type LockMap = Mutex<HashMap<CharacterId, Arc<AsyncMutex<()>>>>;

/// Holds a character's lock; drops the map entry once nobody else wants it.
struct CharacterGuard<'a> {
    locks: &'a LockMap,
    character: CharacterId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for CharacterGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(&self.character)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.character);
        }
    }
}

type SharedRng = Box<dyn RngOracle + Send>;

/// Orchestrates characters, sessions and dungeon runs on top of a repository.
///
/// All mutating operations for one character are serialized through a
/// per-character async lock, so checks such as "no active session" and the
/// write that follows them cannot interleave with another request.
pub struct CombatService {
    repo: Arc<dyn CombatRepository>,
    content: Arc<ContentSnapshot>,
    config: CombatConfig,
    rng: Mutex<SharedRng>,
    locks: LockMap,
    in_flight: Mutex<HashSet<CharacterId>>,
    ids: IdAllocator,
    events: EventBus,
    clock: GameClock,
}

impl CombatService {
    pub fn new(
        repo: Arc<dyn CombatRepository>,
        content: Arc<ContentSnapshot>,
        config: CombatConfig,
    ) -> Self {
        Self {
            repo,
            content,
            config,
            rng: Mutex::new(Box::new(StdRngOracle::from_entropy())),
            locks: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashSet::new()),
            ids: IdAllocator::new(),
            events: EventBus::new(),
            clock: GameClock::default(),
        }
    }

    /// Replace the randomness source, e.g. with a seeded one.
    pub fn with_rng(self, rng: impl RngOracle + Send + 'static) -> Self {
        self.with_boxed_rng(Box::new(rng))
    }

    pub fn with_boxed_rng(mut self, rng: Box<dyn RngOracle + Send>) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn with_clock(mut self, clock: GameClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentSnapshot {
        &self.content
    }

    /// Current game time; pass it to the timestamped operations.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    // ------------------------------------------------------------------
    // Characters
    // ------------------------------------------------------------------

    /// Create and persist a level-1 character.
    pub async fn create_character(&self, name: &str, attributes: StatBlock) -> Result<Character> {
        let id = CharacterId(self.ids.character.fetch_add(1, Ordering::Relaxed));
        let character = Character::create(id, name, attributes, &self.config)?;
        self.repo.save_character(&character).await?;
        info!(character = %id, name = %character.name, "character created");
        Ok(character)
    }

    pub async fn character(&self, id: CharacterId) -> Result<Character> {
        self.load_character(id).await
    }

    /// Spend one stat point; `stat` is parsed case-insensitively.
    pub async fn assign_stat_point(&self, id: CharacterId, stat: &str) -> Result<Character> {
        let _guard = self.lock_character(id).await;

        let mut character = self.load_character(id).await?;
        let stat = character.assign_stat_point_by_name(stat)?;
        self.repo.save_character(&character).await?;
        debug!(character = %id, %stat, remaining = character.stat_points, "stat point assigned");
        Ok(character)
    }

    /// Replace what the character has equipped.
    pub async fn equip(&self, id: CharacterId, equipment: Equipment) -> Result<()> {
        let _guard = self.lock_character(id).await;

        self.load_character(id).await?;
        self.repo.save_equipment(id, &equipment).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Dungeons
    // ------------------------------------------------------------------

    pub async fn start_dungeon(
        &self,
        id: CharacterId,
        dungeon: DungeonId,
        now: Timestamp,
    ) -> Result<DungeonRun> {
        let _guard = self.lock_character(id).await;

        self.load_character(id).await?;
        if let Some(active) = self.repo.active_dungeon_run(id).await? {
            return Err(ServiceError::DungeonAlreadyActive {
                character: id,
                run: active.id,
            });
        }

        let run = DungeonRun {
            id: DungeonRunId(self.ids.dungeon_run.fetch_add(1, Ordering::Relaxed)),
            character: id,
            dungeon,
            status: DungeonStatus::Active,
            started_at: now,
        };
        self.repo.save_dungeon_run(&run).await?;
        info!(character = %id, run = %run.id, %dungeon, "dungeon run started");
        Ok(run)
    }

    pub async fn complete_dungeon(&self, id: CharacterId, run: DungeonRunId) -> Result<DungeonRun> {
        let _guard = self.lock_character(id).await;

        let mut record = self
            .repo
            .load_dungeon_run(run)
            .await?
            .filter(|r| r.character == id && r.is_active())
            .ok_or(ServiceError::DungeonRunNotActive { character: id, run })?;
        record.status = DungeonStatus::Completed;
        self.repo.save_dungeon_run(&record).await?;
        info!(character = %id, %run, "dungeon run completed");
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    /// Whether `enemy` starts a fight on its own during exploration.
    pub fn roll_aggro(&self, enemy: EnemyId) -> Result<bool> {
        let enemy = self
            .content
            .enemy(enemy)
            .ok_or(CombatError::EnemyNotFound { enemy })?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut rng: &mut (dyn RngOracle + Send) = &mut **rng;
        Ok(enemy.roll_aggro(&mut rng))
    }

    /// Open a session against `enemy`, optionally as part of a dungeon run.
    ///
    /// Fails with [`ServiceError::CombatAlreadyActive`] if the character is
    /// already fighting.
    pub async fn start_combat(
        &self,
        id: CharacterId,
        enemy: EnemyId,
        dungeon_run: Option<DungeonRunId>,
        now: Timestamp,
    ) -> Result<CombatSession> {
        let _guard = self.lock_character(id).await;

        let character = self.load_character(id).await?;
        let template = self
            .content
            .enemy(enemy)
            .ok_or(CombatError::EnemyNotFound { enemy })?;

        if let Some(active) = self.repo.active_session(id).await? {
            return Err(ServiceError::CombatAlreadyActive {
                character: id,
                session: active.id,
            });
        }
        if let Some(run) = dungeon_run {
            let active = self.repo.active_dungeon_run(id).await?;
            if active.is_none_or(|r| r.id != run) {
                return Err(ServiceError::DungeonRunNotActive { character: id, run });
            }
        }

        let session = CombatSession::start(
            SessionId(self.ids.session.fetch_add(1, Ordering::Relaxed)),
            &character,
            template,
            dungeon_run,
            now,
        );
        self.repo.save_session(&session).await?;

        info!(character = %id, session = %session.id, %enemy, "combat started");
        self.events.publish(Event::Combat(CombatEvent::Started {
            character: id,
            session: session.id,
            enemy,
        }));
        Ok(session)
    }

    /// Resolve one round of the character's active session and persist it.
    pub async fn process_round(
        &self,
        id: CharacterId,
        ability: Option<AbilityId>,
        now: Timestamp,
    ) -> Result<RoundResult> {
        let _guard = self.lock_character(id).await;

        let session = self
            .repo
            .active_session(id)
            .await?
            .ok_or(CombatError::SessionNotFound { character: id })?;
        let character = self.load_character(id).await?;
        let equipment = self.repo.load_equipment(id).await?;
        let inventory = self.repo.load_inventory(id).await?;

        let result = {
            let input = RoundInput {
                session: &session,
                character: &character,
                equipment: &equipment,
                inventory: &inventory,
                ability,
                now,
            };
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let mut rng: &mut (dyn RngOracle + Send) = &mut **rng;
            self.resolver().process_round(input, &mut rng)?
        };

        self.repo
            .save_combat(&result.character, &result.session, Some(&result.inventory))
            .await?;

        debug!(
            character = %id,
            session = %session.id,
            round = result.session.round,
            outcome = %result.outcome.kind(),
            "round resolved"
        );
        self.after_round(id, &result, now).await?;
        Ok(result)
    }

    async fn after_round(&self, id: CharacterId, result: &RoundResult, now: Timestamp) -> Result<()> {
        let session = result.session.id;
        match &result.outcome {
            RoundOutcome::Victory(rewards) => {
                info!(
                    character = %id,
                    %session,
                    exp = rewards.exp_gained,
                    gold = rewards.gold_gained,
                    drops = rewards.loot.len(),
                    "victory"
                );
                if let Some(named_mob) = rewards.named_defeat {
                    self.repo
                        .record_named_defeat(NamedDefeat {
                            character: id,
                            named_mob,
                            defeated_at: now,
                        })
                        .await?;
                }
                if let Some(level_up) = rewards.level_up {
                    info!(character = %id, level = level_up.to_level, "level up");
                    self.events.publish(Event::Combat(CombatEvent::LeveledUp {
                        character: id,
                        level_up,
                    }));
                }
            }
            RoundOutcome::Defeat {
                respawn_health,
                dungeon_failed,
            } => {
                info!(character = %id, %session, respawn_health, "defeat");
                if let Some(run) = dungeon_failed
                    && let Some(mut record) = self.repo.load_dungeon_run(*run).await?
                {
                    record.status = DungeonStatus::Failed;
                    self.repo.save_dungeon_run(&record).await?;
                    info!(character = %id, %run, "dungeon run failed");
                }
            }
            RoundOutcome::Continue { .. } => {}
        }

        self.events.publish(Event::Combat(CombatEvent::RoundResolved {
            character: id,
            session,
            report: result.report(),
        }));
        if result.outcome.is_terminal() {
            self.events.publish(Event::Combat(CombatEvent::Ended {
                character: id,
                session,
                outcome: result.outcome.kind(),
            }));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    /// Advance the character's session effects to `now`.
    ///
    /// Single-flight per character: a call that overlaps a running tick for
    /// the same character returns [`TickResult::Skipped`] immediately.
    pub async fn tick_character(&self, id: CharacterId, now: Timestamp) -> Result<TickResult> {
        let Some(_flight) = InFlight::enter(&self.in_flight, id) else {
            warn!(character = %id, "previous effect tick still running, skipping");
            return Ok(TickResult::Skipped);
        };

        let _guard = self.lock_character(id).await;

        let Some(session) = self.repo.active_session(id).await? else {
            return Ok(TickResult::Idle);
        };
        let character = self.load_character(id).await?;
        let equipment = self.repo.load_equipment(id).await?;

        let tick = self
            .resolver()
            .tick_session_effects(&session, &character, &equipment, now)?;
        if tick.session != session {
            self.repo
                .save_combat(&tick.character, &tick.session, None)
                .await?;
        }

        let effects = tick.session.effects.views(now);
        debug!(character = %id, %now, lines = tick.log.len(), active = effects.len(), "effects ticked");
        self.events.publish(Event::Effects(EffectsEvent {
            character: id,
            at: now,
            log: tick.log.clone(),
            effects: effects.clone(),
        }));
        Ok(TickResult::Ticked {
            log: tick.log,
            effects,
        })
    }

    /// Live effect list of the character's active session.
    pub async fn effect_views(&self, id: CharacterId, now: Timestamp) -> Result<Vec<EffectView>> {
        Ok(self
            .repo
            .active_session(id)
            .await?
            .map(|session| session.effects.views(now))
            .unwrap_or_default())
    }

    pub async fn characters_in_combat(&self) -> Result<Vec<CharacterId>> {
        Ok(self.repo.characters_in_combat().await?)
    }

    pub async fn named_defeats(&self, id: CharacterId) -> Result<Vec<NamedDefeat>> {
        Ok(self.repo.named_defeats(id).await?)
    }

    pub async fn dungeon_run(&self, run: DungeonRunId) -> Result<Option<DungeonRun>> {
        Ok(self.repo.load_dungeon_run(run).await?)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn resolver(&self) -> CombatResolver<'_> {
        CombatResolver::new(CombatEnv::from_snapshot(&self.content, &self.config))
    }

    async fn lock_character(&self, id: CharacterId) -> CharacterGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(id).or_default())
        };
        CharacterGuard {
            locks: &self.locks,
            character: id,
            guard: Some(lock.lock_owned().await),
        }
    }

    async fn load_character(&self, id: CharacterId) -> Result<Character> {
        self.repo
            .load_character(id)
            .await?
            .ok_or_else(|| ServiceError::character_not_found(id))
    }
}
