//! Timestamp helpers
//!
//! The tree stores microseconds since 1970-01-01 UTC.

use chrono::Utc;

pub const MICROS_PER_SECOND: i64 = 1_000_000;

pub fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}

/// Whole seconds, truncating toward zero.
pub fn micros_to_seconds(micros: i64) -> i64 {
    micros / MICROS_PER_SECOND
}

pub fn seconds_to_micros(seconds: i64) -> i64 {
    seconds.saturating_mul(MICROS_PER_SECOND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_micros_to_seconds_truncates() {
        assert_eq!(micros_to_seconds(1659184459926000), 1659184459);
        assert_eq!(micros_to_seconds(0), 0);
    }

    #[test]
    fn test_seconds_to_micros() {
        assert_eq!(seconds_to_micros(1719774198), 1719774198000000);
    }

    #[test]
    fn test_now_is_after_2020() {
        assert!(now_micros() > 1_577_836_800 * MICROS_PER_SECOND);
    }
}
