//! Time provider abstraction
//!
//! This module provides a [`Clock`] trait that abstracts over time sources,
//! allowing production code to use the real local wall clock while tests can use
//! a controllable fixed time.
//!
//! # Example
//!
//! ```
//! use timecapsule::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let now = clock.now();
//! let display = clock.now_display();
//! assert_eq!(display.len(), "2024-06-10 10:00:00".len());
//! # let _ = now;
//! ```

use std::fmt::Debug;

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

use crate::Timestamp;
use crate::constants::TIMESTAMP_FORMAT;

/// A time provider for getting the current local time.
///
/// This trait abstracts over time sources to enable:
/// - Controllable time in tests (fixed starting point, manual set/advance)
/// - Explicit "now" values threaded through the gate and controller
pub trait Clock: Send + Sync + Debug {
    /// Returns the current local wall-clock time.
    fn now(&self) -> Timestamp;

    /// Returns the current time formatted as `YYYY-MM-DD HH:MM:SS`.
    fn now_display(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Production clock using the host's local time.
///
/// This is the default clock implementation used in production code.
/// It calls through to [`chrono::Local`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        chrono::Local::now().naive_local()
    }
}

/// Test clock pinned to a settable instant.
///
/// Unlike [`SystemClock`] this clock never moves on its own; tests call
/// [`FixedClock::set`] or [`FixedClock::advance`] to cross reveal boundaries.
///
/// # Example
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use timecapsule::{Clock, FixedClock};
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 10)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
/// let clock = FixedClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance(Duration::days(5));
/// assert_eq!(clock.now(), start + Duration::days(5));
/// ```
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a new fixed clock at the given local time.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward (or backward, for negative durations).
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    /// Set the clock to a specific time.
    pub fn set(&self, to: Timestamp) {
        *self.now.lock().unwrap() = to;
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // Monday 2024-06-10 10:00:00, five days before a reveal
        let start = chrono::NaiveDate::from_ymd_opt(2024, 6, 10)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap_or_default();
        Self::new(start)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clone for FixedClock {
    fn clone(&self) -> Self {
        // Clone creates an independent clock at the current value
        Self::new(self.now())
    }
}
