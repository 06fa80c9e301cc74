//! Capsule construction from CLI configuration.

use std::{path::PathBuf, sync::Arc};

use timecapsule::{
    AppController,
    constants::{MESSAGES_FILE, TARGET_FILE},
    schedule::{InMemoryTargetStore, JsonTargetStore, RevealSchedule},
    store::{InMemoryStore, JsonFileStore, MessageStore},
};

use crate::cli::{CapsuleConfig, StoreKind};

/// Human-readable description of the configured store
pub fn store_label(config: &CapsuleConfig) -> String {
    match config.store {
        StoreKind::File => format!("file ({})", data_dir(config).join(MESSAGES_FILE).display()),
        StoreKind::Memory => "memory".to_string(),
    }
}

fn data_dir(config: &CapsuleConfig) -> PathBuf {
    config.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
}

/// Create the controller for the configured store and schedule
pub async fn open_capsule(
    config: &CapsuleConfig,
) -> Result<AppController, Box<dyn std::error::Error>> {
    let (store, schedule): (Arc<dyn MessageStore>, RevealSchedule) = match config.store {
        StoreKind::File => {
            let data_dir = data_dir(config);

            // Ensure data directory exists
            tokio::fs::create_dir_all(&data_dir).await?;

            let messages_path = data_dir.join(MESSAGES_FILE);
            tracing::info!("Using file store at {}", messages_path.display());
            let schedule = if config.rolling_target {
                RevealSchedule::Rolling
            } else {
                RevealSchedule::pinned(JsonTargetStore::new(data_dir.join(TARGET_FILE)))
            };
            let store: Arc<dyn MessageStore> = Arc::new(JsonFileStore::new(messages_path));
            (store, schedule)
        }
        StoreKind::Memory => {
            tracing::info!("Using in-memory store; messages are lost on exit");
            let schedule = if config.rolling_target {
                RevealSchedule::Rolling
            } else {
                RevealSchedule::pinned(InMemoryTargetStore::new())
            };
            let store: Arc<dyn MessageStore> = Arc::new(InMemoryStore::new());
            (store, schedule)
        }
    };

    if !schedule.is_pinned() {
        tracing::warn!("Rolling reveal target: the capsule will never open");
    }

    Ok(AppController::new(store, schedule))
}
