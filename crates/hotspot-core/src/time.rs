//! Report age formatting

use chrono::{DateTime, Utc};

/// Whole minutes elapsed from `timestamp` to `now`, rounded down.
///
/// Negative when `timestamp` is ahead of `now` (clock skew); use
/// [`display_minutes`] for anything shown to the user.
pub fn minutes_since(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - timestamp).num_milliseconds();
    millis.div_euclid(60_000)
}

/// Report age for display, never negative
pub fn display_minutes(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    minutes_since(timestamp, now).max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_same_instant_is_zero_minutes() {
        let now = Utc::now();
        assert_eq!(minutes_since(now, now), 0);
    }

    #[test]
    fn test_ninety_seconds_is_one_minute() {
        let now = Utc::now();
        assert_eq!(minutes_since(now - Duration::milliseconds(90_000), now), 1);
        assert_eq!(minutes_since(now - Duration::milliseconds(59_999), now), 0);
        assert_eq!(minutes_since(now - Duration::minutes(125), now), 125);
    }

    #[test]
    fn test_future_timestamp_floors_negative_and_clamps_for_display() {
        let now = Utc::now();
        let future = now + Duration::seconds(30);
        assert_eq!(minutes_since(future, now), -1);
        assert_eq!(display_minutes(future, now), 0);
    }
}
