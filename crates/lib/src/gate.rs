//! Reveal gate
//!
//! Pure time arithmetic deciding when the capsule opens. Nothing here reads the
//! clock; callers pass "now" in.

use chrono::{Datelike, Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::Timestamp;
use crate::constants::{REVEAL_HOUR, REVEAL_WEEKDAY};

/// Visibility state of the capsule relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    /// Before the target: bodies are hidden and submissions are accepted.
    Locked,
    /// At or after the target: everything is visible.
    Open,
}

impl GateState {
    pub fn is_open(&self) -> bool {
        matches!(self, GateState::Open)
    }
}

/// Computes the reveal target for a given moment.
///
/// The target is the next Saturday at 19:00:00 local time. When `now` is already
/// a Saturday the following week's Saturday is chosen, so the current Saturday is
/// never the target even before 19:00.
pub fn compute_target_timestamp(now: Timestamp) -> Timestamp {
    let today = i64::from(now.weekday().num_days_from_monday());
    let reveal_day = i64::from(REVEAL_WEEKDAY.num_days_from_monday());

    let mut days_ahead = reveal_day - today;
    if days_ahead <= 0 {
        days_ahead += 7;
    }

    let date = now.date() + Duration::days(days_ahead);
    date.and_time(NaiveTime::default()) + Duration::hours(i64::from(REVEAL_HOUR))
}

/// Classifies `now` against `target`. The boundary is inclusive: `now == target` is open.
pub fn state(now: Timestamp, target: Timestamp) -> GateState {
    if now >= target {
        GateState::Open
    } else {
        GateState::Locked
    }
}
