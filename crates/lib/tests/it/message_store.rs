use std::{fs, sync::Arc};

use chrono::Duration;

use timecapsule::{
    FixedClock, Message,
    store::{InMemoryStore, JsonFileStore, MessageStore},
};

use crate::helpers::{file_store, test_store};

#[tokio::test]
async fn test_load_without_data_is_empty() {
    let test = test_store();
    assert!(test.store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_appends_preserve_order_and_fields() {
    let test = test_store();
    let entries = [
        ("민지", "첫 번째 메시지"),
        ("Alex", "second"),
        ("Sam", "multi\nline body"),
        ("Noa", "emoji 🎉"),
        ("Kai", "fifth"),
    ];

    for (i, (author, body)) in entries.iter().enumerate() {
        test.clock.advance(Duration::seconds(i as i64 * 61));
        test.store.append(author, body).await.unwrap();
    }

    let loaded = test.store.load().await.unwrap();
    assert_eq!(loaded.len(), entries.len());
    for (msg, (author, body)) in loaded.iter().zip(entries.iter()) {
        assert_eq!(msg.author, *author);
        assert_eq!(msg.body, *body);
    }
    assert_eq!(loaded[0].submitted_at_display(), "2024-06-10 10:00:00");
    assert_eq!(loaded[1].submitted_at_display(), "2024-06-10 10:01:01");
    assert!(loaded.windows(2).all(|w| w[0].submitted_at <= w[1].submitted_at));
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let (store, clock, dir) = file_store();
    store.append("a", "one").await.unwrap();
    store.append("b", "two").await.unwrap();

    let reopened = JsonFileStore::with_clock(store.path(), clock);
    let loaded = reopened.load().await.unwrap();
    assert_eq!(
        loaded.iter().map(|m| m.author.as_str()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    drop(dir);
}

#[tokio::test]
async fn test_file_format_matches_capsule_layout() {
    let (store, _clock, _dir) = file_store();
    store.append("지수", "토요일에 만나요").await.unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["name"], "지수");
    assert_eq!(first["message"], "토요일에 만나요");
    assert_eq!(first["timestamp"], "2024-06-10 10:00:00");
    assert!(raw.contains("토요일에 만나요"), "non-ASCII must not be escaped");
}

#[tokio::test]
async fn test_reads_file_written_by_hand() {
    let (store, _clock, _dir) = file_store();
    fs::write(
        store.path(),
        r#"[
    {
        "name": "hand",
        "message": "written",
        "timestamp": "2024-06-09 21:15:00"
    }
]"#,
    )
    .unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].submitted_at_display(), "2024-06-09 21:15:00");
}

#[tokio::test]
async fn test_corrupt_file_is_reported_not_repaired() {
    let cases: [&[u8]; 6] = [
        b"{not json",
        b"",
        b"{\"name\": \"a\"}",
        b"[{\"name\": \"a\"}]",
        b"[\"\xff\"]",
        b"[{\"name\":\"\xff\xfe\",\"message\":\"m\",\"timestamp\":\"2024-06-10 10:00:00\"}]",
    ];
    for garbage in cases {
        let (store, _clock, _dir) = file_store();
        fs::write(store.path(), garbage).unwrap();

        let err = store.load().await.unwrap_err();
        assert!(err.is_corrupt_data(), "{garbage:?} gave {err:?}");

        let err = store.append("x", "y").await.unwrap_err();
        assert!(err.is_corrupt_data());
        assert_eq!(fs::read(store.path()).unwrap(), garbage);
    }
}

#[tokio::test]
async fn test_failed_write_keeps_previous_file() {
    let (store, _clock, dir) = file_store();
    store.append("a", "one").await.unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    // A directory squatting on the temp file name makes the write fail
    fs::create_dir(dir.path().join("capsule_data.json.tmp")).unwrap();

    let err = store.append("b", "two").await.unwrap_err();
    assert!(err.is_persistence_error());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    assert_eq!(store.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_creates_missing_parent_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("data").join("capsule_data.json");
    let store = JsonFileStore::with_clock(&path, Arc::new(FixedClock::default()));

    store.append("a", "one").await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_seeded_store_keeps_seed_order() {
    let clock = Arc::new(FixedClock::default());
    let now = timecapsule::Clock::now(clock.as_ref());
    let seed = vec![Message::new("x", "1", now), Message::new("y", "2", now)];
    let store = InMemoryStore::with_messages(clock, seed.clone());

    store.append("z", "3").await.unwrap();
    let loaded = store.load().await.unwrap();
    assert_eq!(&loaded[..2], &seed[..]);
    assert_eq!(loaded[2].author, "z");
}
