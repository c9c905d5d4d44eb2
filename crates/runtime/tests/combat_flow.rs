use std::time::Duration;

use arena_content::ContentFactory;
use arena_core::{
    ActionAttempt, ActionKind, CombatError, EntityId, RngOracle, TickReport, ValidationResponse,
};
use arena_runtime::{AuthorityMap, Event, Runtime, RuntimeError, RuntimeHandle, Topic};

const ATTACKER: EntityId = EntityId(1);
const TARGET: EntityId = EntityId(2);

/// Every point connects.
struct AlwaysHit;

impl RngOracle for AlwaysHit {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }
}

async fn host() -> Runtime {
    Runtime::builder()
        .embedded_content()
        .unwrap()
        .game_seed(7)
        .rng(AlwaysHit)
        .build()
        .await
        .unwrap()
}

async fn run_until_resolved(handle: &RuntimeHandle) -> TickReport {
    for report in handle.step(120).await.unwrap() {
        if !report.resolutions.is_empty() {
            return report;
        }
    }
    panic!("attack never resolved");
}

#[tokio::test]
async fn attack_resolves_against_armour() {
    let runtime = host().await;
    let handle = runtime.handle();
    let mut damage_rx = handle.subscribe(Topic::Damage);

    let attempt = handle
        .perform(ActionKind::MeleeAttack, ATTACKER, TARGET)
        .await
        .unwrap();
    assert!(attempt.is_started());

    let report = run_until_resolved(&handle).await;
    let outcome = *report.resolutions[0].landed().unwrap();
    assert!(outcome.armour_damage > 0.0);
    assert_eq!(outcome.health_damage, 0.0);

    let event = damage_rx.try_recv().unwrap();
    assert_eq!(event.name(), "AddDamage");

    let target = handle.query_actor(TARGET).await.unwrap().unwrap();
    assert_eq!(target.health.hit_points, 120.0);
    assert!(target.armour.value < 30.0);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn validation_refusals_are_values() {
    let runtime = host().await;
    let handle = runtime.handle();

    let attempt = handle
        .perform(ActionKind::MeleeAttack, ATTACKER, ATTACKER)
        .await
        .unwrap();
    assert_eq!(
        attempt,
        ActionAttempt::Rejected(ValidationResponse::InvalidTarget)
    );
}

#[tokio::test]
async fn proxy_cannot_perform_and_never_resolves() {
    let runtime = Runtime::builder()
        .embedded_content()
        .unwrap()
        .authority(AuthorityMap::None)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let err = handle
        .perform(ActionKind::MeleeAttack, ATTACKER, TARGET)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Combat(CombatError::AuthorityViolation { actor: ATTACKER })
    ));

    let reports = handle.step(10).await.unwrap();
    assert!(reports.iter().all(|report| report.resolutions.is_empty()));
    assert_eq!(handle.query_arena().await.unwrap().clock.0, 10);
}

#[tokio::test]
async fn tick_events_carry_the_arena_digest() {
    let runtime = host().await;
    let handle = runtime.handle();
    let mut tick_rx = handle.subscribe(Topic::Tick);

    handle.step(1).await.unwrap();
    let Event::Tick(tick) = tick_rx.recv().await.unwrap() else {
        panic!("expected a tick event");
    };
    assert_eq!(tick.digest, hex::encode(handle.digest().await.unwrap()));
}

#[tokio::test]
async fn identical_sessions_share_a_digest() {
    let mut digests = Vec::new();
    for _ in 0..2 {
        let runtime = Runtime::builder()
            .embedded_content()
            .unwrap()
            .game_seed(99)
            .build()
            .await
            .unwrap();
        let handle = runtime.handle();
        handle
            .perform(ActionKind::MeleeAttack, ATTACKER, TARGET)
            .await
            .unwrap();
        handle.step(90).await.unwrap();
        digests.push(handle.digest().await.unwrap());
    }
    assert_eq!(digests[0], digests[1]);
}

#[tokio::test]
async fn auto_tick_resolves_without_stepping() {
    let runtime = Runtime::builder()
        .embedded_content()
        .unwrap()
        .rng(AlwaysHit)
        .auto_tick(true)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut damage_rx = handle.subscribe(Topic::Damage);

    handle
        .perform(ActionKind::MeleeAttack, ATTACKER, TARGET)
        .await
        .unwrap();
    let event = tokio::time::timeout(Duration::from_secs(5), damage_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.name(), "AddDamage");

    handle.set_auto_tick(false).await.unwrap();
}

#[tokio::test]
async fn bundled_directory_matches_embedded_content() {
    let from_dir = Runtime::builder()
        .content(&ContentFactory::bundled())
        .unwrap()
        .game_seed(1)
        .build()
        .await
        .unwrap();
    let embedded = host().await;

    assert_eq!(
        from_dir.handle().query_arena().await.unwrap(),
        embedded.handle().query_arena().await.unwrap()
    );
}

#[tokio::test]
async fn spawn_rejects_duplicate_ids() {
    let runtime = host().await;
    let handle = runtime.handle();
    let existing = handle.query_actor(ATTACKER).await.unwrap().unwrap();

    let err = handle.spawn(existing).await.unwrap_err();
    assert!(matches!(err, RuntimeError::DuplicateActor(ATTACKER)));

    let removed = handle.despawn(TARGET).await.unwrap();
    assert!(removed.is_some());
    // A target that no longer resolves is reported against the user slot.
    let attempt = handle
        .perform(ActionKind::MeleeAttack, ATTACKER, TARGET)
        .await
        .unwrap();
    assert_eq!(
        attempt,
        ActionAttempt::Rejected(ValidationResponse::InvalidUser)
    );
}

#[tokio::test]
async fn owned_authority_refuses_foreign_targets() {
    let runtime = Runtime::builder()
        .embedded_content()
        .unwrap()
        .authority(AuthorityMap::owning([ATTACKER]))
        .rng(AlwaysHit)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let err = handle
        .perform(ActionKind::MeleeAttack, ATTACKER, TARGET)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Combat(CombatError::AuthorityViolation { actor: TARGET })
    ));

    let attacker = handle.query_actor(ATTACKER).await.unwrap().unwrap();
    assert_eq!(attacker.target_lock, None);
    let reports = handle.step(120).await.unwrap();
    assert!(reports.iter().all(|report| report.resolutions.is_empty()));
    let target = handle.query_actor(TARGET).await.unwrap().unwrap();
    assert_eq!(target.health.hit_points, 120.0);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_closes_the_handle() {
    let runtime = host().await;
    let handle = runtime.handle();
    drop(handle.clone());
    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_stops_the_worker_while_clones_live() {
    let runtime = host().await;
    let handle = runtime.handle();

    tokio::time::timeout(Duration::from_secs(5), runtime.shutdown())
        .await
        .expect("shutdown waited on a live handle")
        .unwrap();

    let err = handle
        .perform(ActionKind::MeleeAttack, ATTACKER, TARGET)
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::CommandChannelClosed));
}
