//! Time helpers
//!
//! Store timestamps are assigned server-side and may be absent on documents
//! that were written before the timestamp resolved. This module gives those
//! timestamps a total order and renders them for activity feeds.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Returns the timestamp, or the Unix epoch when it is absent
///
/// Used when ordering documents newest-first: missing timestamps sort last.
pub fn or_epoch(timestamp: Option<DateTime<Utc>>) -> DateTime<Utc> {
    timestamp.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Formats the age of `timestamp` relative to now
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use core_kernel::relative_time;
///
/// assert_eq!(relative_time(Utc::now() - Duration::minutes(15)), "15m ago");
/// ```
pub fn relative_time(timestamp: DateTime<Utc>) -> String {
    relative_time_from(timestamp, Utc::now())
}

/// Formats the age of `timestamp` as seen from `now`
///
/// * under a minute: `Just now`
/// * under an hour: `{m}m ago`
/// * under a day: `{h}h ago`
/// * otherwise: `{d}d ago`
///
/// Timestamps in the future read `Just now`.
pub fn relative_time_from(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - timestamp).num_seconds();

    if diff < MINUTE {
        "Just now".to_string()
    } else if diff < HOUR {
        format!("{}m ago", diff / MINUTE)
    } else if diff < DAY {
        format!("{}h ago", diff / HOUR)
    } else {
        format!("{}d ago", diff / DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_just_now() {
        assert_eq!(relative_time_from(now() - Duration::seconds(59), now()), "Just now");
        assert_eq!(relative_time_from(now(), now()), "Just now");
    }

    #[test]
    fn test_minutes_hours_days() {
        assert_eq!(relative_time_from(now() - Duration::seconds(60), now()), "1m ago");
        assert_eq!(relative_time_from(now() - Duration::minutes(59), now()), "59m ago");
        assert_eq!(relative_time_from(now() - Duration::hours(1), now()), "1h ago");
        assert_eq!(relative_time_from(now() - Duration::hours(23), now()), "23h ago");
        assert_eq!(relative_time_from(now() - Duration::days(3), now()), "3d ago");
    }

    #[test]
    fn test_future_is_just_now() {
        assert_eq!(relative_time_from(now() + Duration::hours(2), now()), "Just now");
    }

    #[test]
    fn test_or_epoch() {
        assert_eq!(or_epoch(None), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(or_epoch(Some(now())), now());
    }
}
