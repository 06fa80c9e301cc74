//! Application controller
//!
//! Wires the gate, the reveal schedule and the message store together. The
//! controller holds no capsule state of its own: every call reads the store
//! afresh, and "now" is always passed in by the caller.

mod view;

pub use view::{LockedView, OpenView, SAVE_FAILED_MESSAGE, SubmissionOutcome, ViewModel};

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    Result, Timestamp,
    constants::CAPACITY,
    gate::{self, GateState},
    schedule::RevealSchedule,
    store::MessageStore,
};

/// Hint returned when a submission is missing its name or body.
pub const MISSING_FIELDS_HINT: &str = "Please fill in both your name and your message.";

/// Builds view models and accepts submissions for a single capsule.
pub struct AppController {
    store: Arc<dyn MessageStore>,
    schedule: RevealSchedule,
    /// Held across load-check-append so concurrent submissions cannot overfill
    submit_lock: Mutex<()>,
}

impl AppController {
    pub fn new(store: Arc<dyn MessageStore>, schedule: RevealSchedule) -> Self {
        Self {
            store,
            schedule,
            submit_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn MessageStore> {
        &self.store
    }

    pub fn schedule(&self) -> &RevealSchedule {
        &self.schedule
    }

    /// Computes what the presentation layer should show at `now`.
    ///
    /// While locked, only author names are exposed. Once open, every message is
    /// returned in full.
    pub async fn render_state(&self, now: Timestamp) -> Result<ViewModel> {
        let target = self.schedule.resolve(now).await?;
        self.view_for(now, target).await
    }

    /// Same view as [`render_state`](Self::render_state) without pinning an
    /// unpinned target. Nothing is written.
    pub async fn preview_state(&self, now: Timestamp) -> Result<ViewModel> {
        let target = self.schedule.peek(now).await?;
        self.view_for(now, target).await
    }

    async fn view_for(&self, now: Timestamp, target: Timestamp) -> Result<ViewModel> {
        let state = gate::state(now, target);
        let messages = self.store.load().await?;

        tracing::debug!(?state, %target, count = messages.len(), "Rendering capsule");

        Ok(match state {
            GateState::Locked => ViewModel::Locked(LockedView::new(target, &messages, CAPACITY)),
            GateState::Open => ViewModel::Open(OpenView::new(target, messages)),
        })
    }

    /// Validates and stores one submission.
    ///
    /// Storage failures are returned as errors; the caller keeps the input and
    /// may retry. Callers should re-render after [`SubmissionOutcome::Success`].
    pub async fn submit(&self, name: &str, body: &str) -> Result<SubmissionOutcome> {
        if name.trim().is_empty() || body.trim().is_empty() {
            tracing::warn!("Rejected submission with an empty field");
            return Ok(SubmissionOutcome::ValidationFailed {
                hint: MISSING_FIELDS_HINT.to_string(),
            });
        }

        let _guard = self.submit_lock.lock().await;

        let count = self.store.load().await?.len();
        if count >= CAPACITY {
            tracing::warn!(count, "Rejected submission from {name}: capsule is full");
            return Ok(SubmissionOutcome::CapacityReached);
        }

        if let Err(e) = self.store.append(name, body).await {
            tracing::error!("Failed to save message from {name}: {e}");
            return Err(e);
        }
        Ok(SubmissionOutcome::Success)
    }
}
