//! In-memory message store
//!
//! Suitable for tests and ephemeral runs where nothing should touch the disk.

use std::sync::Arc;
#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::MessageStore;
#[cfg(any(test, feature = "testing"))]
use super::StoreError;
use crate::{Clock, Result, SystemClock, message::Message};

/// A message store that keeps the sequence in a `Vec`.
///
/// Appends build the extended sequence and swap it in as a whole, mirroring the
/// full-rewrite behavior of [`super::JsonFileStore`].
#[derive(Debug)]
pub struct InMemoryStore {
    messages: RwLock<Vec<Message>>,
    clock: Arc<dyn Clock>,
    #[cfg(any(test, feature = "testing"))]
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_messages(clock, Vec::new())
    }

    /// Creates a store already holding `messages`.
    pub fn with_messages(clock: Arc<dyn Clock>, messages: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(messages),
            clock,
            #[cfg(any(test, feature = "testing"))]
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent append fail with [`StoreError::Unavailable`].
    #[cfg(any(test, feature = "testing"))]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    #[cfg(any(test, feature = "testing"))]
    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "in-memory store is rejecting writes".to_string(),
            }
            .into());
        }
        Ok(())
    }

    #[cfg(not(any(test, feature = "testing")))]
    fn check_writable(&self) -> Result<()> {
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn load(&self) -> Result<Vec<Message>> {
        Ok(self.messages.read().await.clone())
    }

    async fn append(&self, author: &str, body: &str) -> Result<()> {
        let mut messages = self.messages.write().await;
        self.check_writable()?;

        let mut updated = messages.clone();
        updated.push(Message::new(author, body, self.clock.now()));
        *messages = updated;

        tracing::debug!(count = messages.len(), "Appended message from {author}");
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
