//! Reveal schedules
//!
//! The gate computes a target from "now", which always lands in the future. Left
//! alone that means a capsule recomputed on every request never opens: each week
//! the target silently rolls forward. [`RevealSchedule::Pinned`] fixes the target
//! the first time it is resolved and persists it; [`RevealSchedule::Rolling`]
//! keeps the recompute-every-time behavior.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    Result, Timestamp, gate,
    message::timestamp_format,
    store::{read_json, write_json},
};

/// Persistence for a single pinned reveal target.
#[async_trait]
pub trait TargetStore: Send + Sync + std::fmt::Debug {
    /// Returns the pinned target, if one has been saved.
    async fn load(&self) -> Result<Option<Timestamp>>;

    /// Pins `target`, replacing any previous value.
    async fn save(&self, target: Timestamp) -> Result<()>;
}

/// On-disk shape of the target file: `{ "target": "YYYY-MM-DD HH:MM:SS" }`.
#[derive(Serialize, Deserialize)]
struct PinnedTarget {
    #[serde(with = "timestamp_format")]
    target: Timestamp,
}

/// A [`TargetStore`] persisted as a small JSON file next to the message store.
#[derive(Debug, Clone)]
pub struct JsonTargetStore {
    path: PathBuf,
}

impl JsonTargetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl TargetStore for JsonTargetStore {
    async fn load(&self) -> Result<Option<Timestamp>> {
        let pinned: Option<PinnedTarget> = read_json(&self.path).await?;
        Ok(pinned.map(|p| p.target))
    }

    async fn save(&self, target: Timestamp) -> Result<()> {
        write_json(&self.path, &PinnedTarget { target }).await
    }
}

/// A [`TargetStore`] that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct InMemoryTargetStore {
    target: RwLock<Option<Timestamp>>,
}

impl InMemoryTargetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `target` already pinned.
    pub fn with_target(target: Timestamp) -> Self {
        Self {
            target: RwLock::new(Some(target)),
        }
    }
}

#[async_trait]
impl TargetStore for InMemoryTargetStore {
    async fn load(&self) -> Result<Option<Timestamp>> {
        Ok(*self.target.read().await)
    }

    async fn save(&self, target: Timestamp) -> Result<()> {
        *self.target.write().await = Some(target);
        Ok(())
    }
}

/// Strategy for choosing the reveal target.
#[derive(Debug, Clone)]
pub enum RevealSchedule {
    /// Recompute the target from "now" on every call. The target is then always
    /// in the future and the capsule never opens.
    Rolling,
    /// Compute the target once, persist it, and reuse it from then on.
    Pinned(Arc<dyn TargetStore>),
}

impl RevealSchedule {
    /// Pinned schedule backed by `store`.
    pub fn pinned(store: impl TargetStore + 'static) -> Self {
        RevealSchedule::Pinned(Arc::new(store))
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, RevealSchedule::Pinned(_))
    }

    /// Returns the target in effect at `now`.
    pub async fn resolve(&self, now: Timestamp) -> Result<Timestamp> {
        match self {
            RevealSchedule::Rolling => Ok(gate::compute_target_timestamp(now)),
            RevealSchedule::Pinned(store) => {
                if let Some(target) = store.load().await? {
                    return Ok(target);
                }
                let target = gate::compute_target_timestamp(now);
                store.save(target).await?;
                tracing::info!(%target, "Pinned reveal target");
                Ok(target)
            }
        }
    }

    /// Like [`resolve`](Self::resolve) but never writes: an unpinned schedule
    /// reports the target it would pin at `now`.
    pub async fn peek(&self, now: Timestamp) -> Result<Timestamp> {
        match self {
            RevealSchedule::Rolling => Ok(gate::compute_target_timestamp(now)),
            RevealSchedule::Pinned(store) => Ok(store
                .load()
                .await?
                .unwrap_or_else(|| gate::compute_target_timestamp(now))),
        }
    }
}
