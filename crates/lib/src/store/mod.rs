//! Message store implementations
//!
//! This module provides the [`MessageStore`] trait and its implementations.
//!
//! The trait has exactly two operations: load the full ordered sequence and append
//! one message. Appends always rewrite the whole sequence; there is no update or
//! delete. The store does not enforce the capsule capacity; that check belongs to
//! the controller, but an append past capacity still leaves the store consistent.

mod errors;
mod file;
mod in_memory;

pub use errors::StoreError;
pub use file::JsonFileStore;
pub use in_memory::InMemoryStore;

pub(crate) use file::{read_json, write_json};

use async_trait::async_trait;

use crate::Result;
use crate::message::Message;

/// Storage abstraction for capsule messages.
///
/// All implementations must be `Send` and `Sync` so one handle can be shared by
/// every request the server handles.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Loads every persisted message in insertion order.
    ///
    /// # Returns
    /// An empty vector when nothing has been persisted yet, or
    /// [`StoreError::CorruptData`] when persisted data cannot be parsed.
    async fn load(&self) -> Result<Vec<Message>>;

    /// Appends one message stamped with the store's current time.
    ///
    /// The full sequence is read, extended and written back. A failed write
    /// surfaces as [`StoreError::Persistence`] and leaves prior content intact.
    async fn append(&self, author: &str, body: &str) -> Result<()>;

    /// Short label naming the storage kind, for health reporting.
    fn kind(&self) -> &'static str;
}
