use chrono::{Datelike, Duration, Timelike, Weekday};

use timecapsule::{
    GateState,
    gate::{compute_target_timestamp, state},
};

use crate::helpers::{at, coming_saturday, monday_morning};

#[test]
fn test_documented_examples() {
    assert_eq!(compute_target_timestamp(monday_morning()), coming_saturday());
    assert_eq!(
        compute_target_timestamp(at(2024, 6, 15, 8, 0, 0)),
        at(2024, 6, 22, 19, 0, 0)
    );
}

#[test]
fn test_each_weekday_maps_to_expected_saturday() {
    // 2024-06-10 is a Monday
    let expected_days_ahead = [5, 4, 3, 2, 1, 7, 6];
    for (offset, days_ahead) in expected_days_ahead.iter().enumerate() {
        let now = at(2024, 6, 10, 12, 30, 0) + Duration::days(offset as i64);
        let target = compute_target_timestamp(now);
        assert_eq!(
            target.date(),
            now.date() + Duration::days(*days_ahead),
            "wrong target for {:?}",
            now.weekday()
        );
    }
}

#[test]
fn test_saturday_never_targets_itself_at_any_minute() {
    let saturday = at(2024, 6, 15, 0, 0, 0);
    for minute in (0..24 * 60).step_by(7) {
        let now = saturday + Duration::minutes(minute);
        let target = compute_target_timestamp(now);
        assert_eq!(target, at(2024, 6, 22, 19, 0, 0), "at {now}");
    }
}

#[test]
fn test_target_is_always_saturday_evening() {
    let mut now = at(2023, 12, 25, 3, 14, 15);
    let end = at(2024, 3, 5, 0, 0, 0);
    while now < end {
        let target = compute_target_timestamp(now);
        assert_eq!(target.weekday(), Weekday::Sat);
        assert_eq!(target.time().hour(), 19);
        assert_eq!(target.time().minute(), 0);
        assert_eq!(target.time().second(), 0);
        assert_eq!(state(now, target), GateState::Locked);
        now += Duration::hours(5) + Duration::minutes(11);
    }
}

#[test]
fn test_state_around_target() {
    let target = coming_saturday();
    assert_eq!(state(monday_morning(), target), GateState::Locked);
    assert_eq!(state(target - Duration::milliseconds(1), target), GateState::Locked);
    assert_eq!(state(target, target), GateState::Open);
    assert_eq!(state(target + Duration::seconds(1), target), GateState::Open);
}
