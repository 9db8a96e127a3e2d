mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use combat_runtime::repository::CombatRepository;
use combat_core::{CharacterId, StatBlock, Timestamp};
use combat_runtime::{CombatService, Event, TickResult, Topic};

use common::{GOBLIN, GatedRepository, POISON_STRIKE, service, service_over};

/// Hero fighting the goblin with poison applied at t=0.
async fn poisoned_goblin(service: &CombatService) -> CharacterId {
    let hero = service
        .create_character("Aria", StatBlock::neutral())
        .await
        .unwrap();
    service
        .start_combat(hero.id, GOBLIN, None, Timestamp(0))
        .await
        .unwrap();
    let round = service
        .process_round(hero.id, Some(POISON_STRIKE), Timestamp(0))
        .await
        .unwrap();
    assert!(round.log.iter().any(|line| line == "Poison takes hold on Goblin."));
    hero.id
}

#[tokio::test]
async fn ticks_apply_poison_and_publish_the_effect_list() {
    let service = service();
    let mut events = service.subscribe(Topic::Effects);
    let hero = poisoned_goblin(&service).await;

    let tick = service.tick_character(hero, Timestamp(2)).await.unwrap();
    let TickResult::Ticked { log, effects } = tick else {
        panic!("expected a tick, got {tick:?}");
    };
    assert_eq!(log, vec!["Poison deals 4 damage to Goblin.".to_string()]);
    assert_eq!(effects.len(), 1);

    match events.recv().await.unwrap() {
        Event::Effects(event) => {
            assert_eq!(event.character, hero);
            assert_eq!(event.at, Timestamp(2));
            assert_eq!(event.log, log);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    service.tick_character(hero, Timestamp(4)).await.unwrap();
    let last = service.tick_character(hero, Timestamp(6)).await.unwrap();
    let TickResult::Ticked { log, effects } = last else {
        panic!("expected a tick, got {last:?}");
    };
    assert!(log.iter().any(|line| line == "Poison wore off."));
    assert!(effects.is_empty());
    assert!(service.effect_views(hero, Timestamp(6)).await.unwrap().is_empty());

    // Goblin took 1 from the opening hit and 12 from poison.
    let next = service.process_round(hero, None, Timestamp(7)).await.unwrap();
    assert_eq!(next.session.enemy_health, 16);
}

#[tokio::test]
async fn ticks_outside_combat_are_idle() {
    let service = service();
    let hero = service
        .create_character("Aria", StatBlock::neutral())
        .await
        .unwrap();
    assert_eq!(
        service.tick_character(hero.id, Timestamp(1)).await.unwrap(),
        TickResult::Idle
    );
}

#[tokio::test]
async fn overlapping_tick_for_the_same_character_is_skipped() {
    let repo = Arc::new(GatedRepository::default());
    let service = service_over(Arc::clone(&repo) as Arc<dyn CombatRepository>);
    let hero = poisoned_goblin(&service).await;

    repo.armed.store(true, Ordering::SeqCst);
    let first = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.tick_character(hero, Timestamp(2)).await }
    });
    repo.entered.notified().await;

    let second = service.tick_character(hero, Timestamp(2)).await.unwrap();
    assert_eq!(second, TickResult::Skipped);

    repo.release.notify_one();
    let first = first.await.unwrap().unwrap();
    assert!(matches!(first, TickResult::Ticked { ref log, .. } if log.len() == 1));

    // The slot is free again once the first tick finished.
    let third = service.tick_character(hero, Timestamp(2)).await.unwrap();
    assert!(matches!(third, TickResult::Ticked { ref log, .. } if log.is_empty()));
}
