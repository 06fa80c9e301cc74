//! JSON file persistence
//!
//! This module handles serialization and file I/O for the capsule's flat JSON
//! files. Every write replaces the whole file: the new content goes to a sibling
//! temporary file first and is renamed into place, so a failed write never
//! truncates what was there before.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use super::{MessageStore, StoreError};
use crate::{Clock, Result, SystemClock, message::Message};

/// Reads and parses a JSON file.
///
/// Returns `Ok(None)` if the file does not exist. Content that is not valid
/// UTF-8 JSON is [`StoreError::CorruptData`].
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let value = serde_json::from_slice(&bytes).map_err(|e| StoreError::CorruptData {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        }
        .into()),
    }
}

/// Serializes `value` as 4-space indented JSON and replaces `path` with it.
///
/// Non-ASCII text is written as-is, never `\u` escaped.
pub(crate) async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| StoreError::SerializationFailed { source: e })?;

    let persistence = |source| StoreError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(persistence)?;
    }

    let tmp_path = temp_path_for(path);
    if let Err(e) = tokio::fs::write(&tmp_path, &buf).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(persistence(e).into());
    }
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(persistence(e).into());
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// A message store persisted as a single JSON array on disk.
///
/// The file is created on the first append; until then [`MessageStore::load`]
/// returns an empty sequence. Each load reads the whole file, each append rewrites
/// it.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by `path`, stamping messages with the system clock.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Creates a store backed by `path` using a custom clock.
    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MessageStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Message>> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    async fn append(&self, author: &str, body: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut messages = self.load().await?;
        messages.push(Message::new(author, body, self.clock.now()));
        write_json(&self.path, &messages).await?;

        tracing::info!(
            path = %self.path.display(),
            count = messages.len(),
            "Appended message from {author}"
        );
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
