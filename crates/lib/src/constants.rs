//! Constants used throughout the Timecapsule library.
//!
//! This module provides central definitions for the capsule's fixed rules
//! and the file names and formats of its persisted state.

use chrono::Weekday;

/// Maximum number of messages a capsule accepts.
pub const CAPACITY: usize = 5;

/// Day of the week on which the capsule opens.
pub const REVEAL_WEEKDAY: Weekday = Weekday::Sat;

/// Local hour of the reveal (19:00).
pub const REVEAL_HOUR: u32 = 19;

/// Persisted timestamp format, local time with second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used when showing the target while the capsule is sealed.
pub const TARGET_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format used when showing the reveal date once the capsule is open.
pub const REVEAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default file name of the message store inside the data directory.
pub const MESSAGES_FILE: &str = "capsule_data.json";

/// Default file name of the pinned reveal target inside the data directory.
pub const TARGET_FILE: &str = "capsule_target.json";
