//!
//! Timecapsule: a small shared capsule of messages that stays sealed until a
//! fixed reveal time.
//!
//! ## Core Concepts
//!
//! * **Gate (`gate`)**: Computes the reveal target (the next Saturday at 19:00,
//!   never the current Saturday) and classifies "now" as `Locked` or `Open`.
//! * **Messages (`message::Message`)**: Immutable records of who wrote what and when.
//! * **Stores (`store::MessageStore`)**: A pluggable, append-only persistence layer.
//!   `JsonFileStore` writes a flat JSON file; `InMemoryStore` keeps everything in memory.
//! * **Schedules (`schedule::RevealSchedule`)**: Decide whether the target is recomputed
//!   on every call or pinned once and persisted.
//! * **Controller (`controller::AppController`)**: Builds view models for the presentation
//!   layer and validates submissions against the capacity limit.
//!
//! Time is always passed in explicitly; production callers read it from a [`Clock`].

pub mod clock;
pub mod constants;
pub mod controller;
pub mod gate;
pub mod message;
pub mod schedule;
pub mod store;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use controller::{AppController, SubmissionOutcome, ViewModel};
pub use gate::GateState;
pub use message::Message;

/// Local wall-clock timestamp used throughout the crate.
///
/// The capsule has no notion of time zones: targets and submission times are
/// all expressed in the local time of the host.
pub type Timestamp = chrono::NaiveDateTime;

/// Result type used throughout the Timecapsule library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Timecapsule library.
///
/// Every I/O and serialization failure happens inside a store and is classified
/// there, so this wraps [`store::StoreError`] and nothing else.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Structured storage errors from the store module
    #[error(transparent)]
    Store(store::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Store(_) => "store",
        }
    }

    /// Check if persisted data exists but could not be understood.
    pub fn is_corrupt_data(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_corrupt(),
        }
    }

    /// Check if this error indicates a failed write.
    pub fn is_persistence_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_persistence(),
        }
    }
}

impl From<store::StoreError> for Error {
    fn from(err: store::StoreError) -> Self {
        Error::Store(err)
    }
}
