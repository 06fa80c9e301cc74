use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use timecapsule::{
    AppController, FixedClock, Timestamp,
    schedule::{InMemoryTargetStore, RevealSchedule},
    store::{InMemoryStore, JsonFileStore, MessageStore},
};

// ==========================
// CORE TEST FACTORIES
// ==========================
// These are the foundation for all test setup. They provide a single point of change
// for store matrix testing via the TEST_STORE env var.

/// Builds a local timestamp from its parts.
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .expect("valid test timestamp")
}

/// Monday 2024-06-10 10:00:00, the default [`FixedClock`] start.
pub fn monday_morning() -> Timestamp {
    at(2024, 6, 10, 10, 0, 0)
}

/// The reveal target computed from [`monday_morning`].
pub fn coming_saturday() -> Timestamp {
    at(2024, 6, 15, 19, 0, 0)
}

/// A message store plus whatever must outlive it.
pub struct TestStore {
    pub store: Arc<dyn MessageStore>,
    pub clock: Arc<FixedClock>,
    /// Keeps the backing directory alive for file stores
    pub _dir: Option<TempDir>,
}

/// Creates a test store based on the TEST_STORE env var.
///
/// Supported values:
/// - "memory" or unset: InMemoryStore (default)
/// - "file": JsonFileStore in a fresh temporary directory
///
/// # Example
/// ```bash
/// TEST_STORE=file cargo test
/// ```
pub fn test_store() -> TestStore {
    let clock = Arc::new(FixedClock::default());
    match std::env::var("TEST_STORE").as_deref() {
        Ok("file") => {
            let dir = TempDir::new().expect("Failed to create temp dir");
            let store = JsonFileStore::with_clock(dir.path().join("capsule_data.json"), clock.clone());
            TestStore {
                store: Arc::new(store),
                clock,
                _dir: Some(dir),
            }
        }
        Ok("memory") | Ok("") | Err(_) => TestStore {
            store: Arc::new(InMemoryStore::with_clock(clock.clone())),
            clock,
            _dir: None,
        },
        Ok(other) => panic!("Unknown TEST_STORE value: {other}. Supported: memory, file"),
    }
}

/// A JsonFileStore in its own temporary directory.
pub fn file_store() -> (JsonFileStore, Arc<FixedClock>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let clock = Arc::new(FixedClock::default());
    let store = JsonFileStore::with_clock(dir.path().join("capsule_data.json"), clock.clone());
    (store, clock, dir)
}

/// A controller over [`test_store`] with a pinned, in-memory reveal target.
pub fn test_controller() -> (AppController, TestStore) {
    let test_store = test_store();
    let controller = AppController::new(
        test_store.store.clone(),
        RevealSchedule::pinned(InMemoryTargetStore::new()),
    );
    (controller, test_store)
}

/// A controller whose store can be told to fail writes.
pub fn failing_controller() -> (AppController, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::with_clock(Arc::new(FixedClock::default())));
    let controller = AppController::new(
        store.clone(),
        RevealSchedule::pinned(InMemoryTargetStore::new()),
    );
    (controller, store)
}

/// Submits `count` valid messages named `participant-N`, asserting each succeeds.
pub async fn fill(controller: &AppController, count: usize) {
    for i in 0..count {
        let outcome = controller
            .submit(&format!("participant-{i}"), &format!("secret #{i}"))
            .await
            .expect("submission should not fail");
        assert!(outcome.is_success(), "submission {i} got {outcome:?}");
    }
}
