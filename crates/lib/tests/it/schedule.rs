use std::{fs, sync::Arc};

use chrono::Duration;
use tempfile::TempDir;

use timecapsule::{
    AppController, FixedClock,
    schedule::{InMemoryTargetStore, JsonTargetStore, RevealSchedule, TargetStore},
    store::InMemoryStore,
};

use crate::helpers::{at, coming_saturday, monday_morning};

#[tokio::test]
async fn test_pinned_target_does_not_roll_across_week_boundary() {
    let dir = TempDir::new().unwrap();
    let schedule = RevealSchedule::pinned(JsonTargetStore::new(dir.path().join("t.json")));

    assert_eq!(schedule.resolve(monday_morning()).await.unwrap(), coming_saturday());
    // Sunday after the reveal would compute the next Saturday if recomputed
    let sunday = at(2024, 6, 16, 9, 0, 0);
    assert_eq!(schedule.resolve(sunday).await.unwrap(), coming_saturday());
}

#[tokio::test]
async fn test_preexisting_target_wins() {
    let pinned = at(2030, 1, 5, 19, 0, 0);
    let schedule = RevealSchedule::pinned(InMemoryTargetStore::with_target(pinned));
    assert_eq!(schedule.resolve(monday_morning()).await.unwrap(), pinned);
}

#[tokio::test]
async fn test_target_file_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("capsule_target.json");
    let store = JsonTargetStore::new(&path);
    let schedule = RevealSchedule::pinned(store.clone());

    schedule.resolve(monday_morning()).await.unwrap();
    let first = fs::read_to_string(&path).unwrap();
    schedule
        .resolve(monday_morning() + Duration::days(3))
        .await
        .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
    assert_eq!(store.load().await.unwrap(), Some(coming_saturday()));
}

#[tokio::test]
async fn test_capsule_opens_with_pinned_target_and_clock() {
    let clock = Arc::new(FixedClock::default());
    let store = Arc::new(InMemoryStore::with_clock(clock.clone()));
    let controller =
        AppController::new(store, RevealSchedule::pinned(InMemoryTargetStore::new()));

    let now = timecapsule::Clock::now(clock.as_ref());
    assert!(!controller.render_state(now).await.unwrap().is_open());

    clock.set(coming_saturday());
    let now = timecapsule::Clock::now(clock.as_ref());
    let view = controller.render_state(now).await.unwrap();
    assert!(view.is_open());
    assert_eq!(view.target(), coming_saturday());
}
