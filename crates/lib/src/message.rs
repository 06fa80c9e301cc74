//! Capsule messages and their persisted representation.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// One participant's message.
///
/// Field names on disk follow the capsule file format: `name`, `message` and
/// `timestamp` (local time, `YYYY-MM-DD HH:MM:SS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "name")]
    pub author: String,
    #[serde(rename = "message")]
    pub body: String,
    #[serde(rename = "timestamp", with = "timestamp_format")]
    pub submitted_at: Timestamp,
}

impl Message {
    /// Create a message, truncating `submitted_at` to whole seconds.
    pub fn new(author: impl Into<String>, body: impl Into<String>, submitted_at: Timestamp) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
            submitted_at: truncate_to_seconds(submitted_at),
        }
    }

    /// The submission time as stored on disk.
    pub fn submitted_at_display(&self) -> String {
        self.submitted_at
            .format(crate::constants::TIMESTAMP_FORMAT)
            .to_string()
    }
}

fn truncate_to_seconds(ts: Timestamp) -> Timestamp {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS` timestamps.
pub mod timestamp_format {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::Timestamp;
    use crate::constants::TIMESTAMP_FORMAT;

    pub fn serialize<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(|e| {
            serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}"))
        })
    }
}
