//! Tests for time helpers

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{or_epoch, relative_time, relative_time_from};
use proptest::prelude::*;

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap()
}

#[test]
fn test_relative_time_against_wall_clock() {
    assert_eq!(relative_time(Utc::now()), "Just now");
    assert_eq!(relative_time(Utc::now() - Duration::days(2)), "2d ago");
}

#[test]
fn test_boundaries() {
    let now = reference();
    assert_eq!(relative_time_from(now - Duration::seconds(3599), now), "59m ago");
    assert_eq!(relative_time_from(now - Duration::seconds(3600), now), "1h ago");
    assert_eq!(relative_time_from(now - Duration::seconds(86_399), now), "23h ago");
    assert_eq!(relative_time_from(now - Duration::seconds(86_400), now), "1d ago");
}

#[test]
fn test_missing_timestamps_sort_last_when_descending() {
    let mut stamps = vec![None, Some(reference()), Some(reference() - Duration::hours(1))];
    stamps.sort_by_key(|ts| std::cmp::Reverse(or_epoch(*ts)));
    assert_eq!(stamps.last(), Some(&None));
    assert_eq!(stamps.first(), Some(&Some(reference())));
}

proptest! {
    #[test]
    fn prop_label_has_known_shape(secs in 0i64..10_000_000) {
        let now = reference();
        let label = relative_time_from(now - Duration::seconds(secs), now);
        prop_assert!(
            label == "Just now"
                || label.ends_with("m ago")
                || label.ends_with("h ago")
                || label.ends_with("d ago")
        );
    }
}
