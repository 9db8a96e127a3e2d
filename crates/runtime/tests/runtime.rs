mod common;

use std::path::Path;
use std::time::Duration;

use combat_core::{SequenceRng, StatBlock};
use combat_runtime::{CombatRuntime, Event, ServiceError, Topic};

use common::{GOBLIN, POISON_STRIKE, content, init_tracing};

#[tokio::test(start_paused = true)]
async fn ticker_drives_effects_on_its_interval() {
    init_tracing();
    let runtime = CombatRuntime::builder()
        .content(content())
        .rng(SequenceRng::lowest())
        .build()
        .unwrap();
    let service = runtime.service();
    let mut effects = runtime.subscribe(Topic::Effects);

    let hero = service
        .create_character("Aria", StatBlock::neutral())
        .await
        .unwrap();
    service
        .start_combat(hero.id, GOBLIN, None, service.now())
        .await
        .unwrap();
    service
        .process_round(hero.id, Some(POISON_STRIKE), service.now())
        .await
        .unwrap();

    let lines = tokio::time::timeout(Duration::from_secs(30), async {
        let mut lines = Vec::new();
        while lines.len() < 3 {
            if let Ok(Event::Effects(event)) = effects.recv().await {
                lines.extend(event.log.into_iter().filter(|line| line.contains("deals")));
            }
        }
        lines
    })
    .await
    .expect("three poison ticks within the timeout");

    assert_eq!(lines, vec!["Poison deals 4 damage to Goblin.".to_string(); 3]);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn build_requires_content() {
    let err = CombatRuntime::builder().build().err().unwrap();
    assert!(matches!(err, ServiceError::Content(_)));
    assert_eq!(err.kind(), None);
}

fn write_data(dir: &Path) {
    std::fs::write(dir.join("config.toml"), "respawn_health_percent = 25\n").unwrap();
    std::fs::write(dir.join("effects.ron"), "(effects: [])").unwrap();
    std::fs::write(
        dir.join("abilities.ron"),
        r#"(abilities: [(id: AbilityId(1), name: "Smite", mana_cost: 10, kind: Damage(min: 4, max: 8))])"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("enemies.ron"),
        r#"(mobs: [(id: MobId(1), stats: (name: "Rat", level: 1, max_health: 12, damage_min: 1, damage_max: 2, defense: 0, attack_speed: 1, exp_reward: 10, gold_min: 0, gold_max: 2), aggro_chance: 0.8)])"#,
    )
    .unwrap();
    std::fs::write(dir.join("items.ron"), "(items: [])").unwrap();
    std::fs::write(dir.join("loot.ron"), "(tables: [])").unwrap();
}

#[tokio::test]
async fn build_loads_content_and_config_from_a_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());

    let runtime = CombatRuntime::builder()
        .data_dir(dir.path())
        .build()
        .unwrap();
    let service = runtime.service();
    assert_eq!(service.config().respawn_health_percent, 25);
    assert_eq!(service.content().enemy_count(), 1);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn broken_data_dir_is_a_content_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "xp_per_level = \"many\"\n").unwrap();

    let err = CombatRuntime::builder()
        .data_dir(dir.path())
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ServiceError::Content(_)));
}
