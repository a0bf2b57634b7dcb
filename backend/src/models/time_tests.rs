#[cfg(test)]
mod tests {
    use crate::models::time::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_days_between_dates() {
        assert_eq!(days_between("2026-01-01", "2026-01-10"), Some(9));
        assert_eq!(days_between("2026-01-10", "2026-01-01"), Some(9));
        assert_eq!(days_between("2026-01-01", "2026-01-01"), Some(0));
    }

    #[test]
    fn test_days_between_rounds_partial_days_up() {
        assert_eq!(
            days_between("2026-01-01T00:00:00Z", "2026-01-01T00:00:01Z"),
            Some(1)
        );
        assert_eq!(
            days_between("2026-01-01T00:00:00Z", "2026-01-02T12:00:00Z"),
            Some(2)
        );
    }

    #[test]
    fn test_days_between_invalid_input() {
        assert_eq!(days_between("not-a-date", "2026-01-10"), None);
        assert_eq!(days_between("2026-01-10", ""), None);
    }

    #[test]
    fn test_days_since_is_symmetric_and_non_negative() {
        let now = Utc.with_ymd_and_hms(2026, 1, 20, 0, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2026, 1, 28, 0, 0, 0).unwrap();
        assert_eq!(days_since(past, now), 8);
        assert_eq!(days_since(future, now), 8);
    }

    #[test]
    fn test_parse_instant_variants() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 12, 10, 30, 0).unwrap();
        assert_eq!(parse_instant("2026-01-12T10:30:00Z"), Some(expected));
        assert_eq!(parse_instant("2026-01-12T10:30:00+00:00"), Some(expected));
        assert_eq!(parse_instant("2026-01-12T07:30:00-03:00"), Some(expected));
        assert_eq!(parse_instant("2026-01-12T10:30:00"), Some(expected));
        assert_eq!(parse_instant("2026-01-12 10:30:00"), Some(expected));
        assert_eq!(parse_instant("2026-01-12T10:30"), Some(expected));
        assert_eq!(
            parse_instant("2026-01-12"),
            Some(Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_instant("  "), None);
        assert!(!is_valid_date("12/01/2026"));
        assert!(is_valid_date("2026-01-12"));
    }

    #[test]
    fn test_date_to_instant_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(
            date_to_instant(date),
            Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_234), "1.234");
        assert_eq!(format_count(1_234_567), "1.234.567");
        assert_eq!(format_count(100_000), "100.000");
    }

    #[test]
    fn test_formatter_uses_utc_minus_three() {
        let formatter = DateFormatter::default();
        let instant = Utc.with_ymd_and_hms(2026, 1, 12, 2, 5, 0).unwrap();
        // 02:05 UTC is 23:05 of the previous day at UTC-3
        assert_eq!(formatter.format_date(instant), "11/01/2026");
        assert_eq!(formatter.format_datetime(instant), "11/01/2026 23:05");
        assert_eq!(formatter.format_date_short(instant), "11/01");
        assert_eq!(formatter.format_time(instant), "23:05");
    }

    #[test]
    fn test_legacy_shift_reproduces_utc_digits() {
        let formatter = DateFormatter::new(-3, true).unwrap();
        let instant = Utc.with_ymd_and_hms(2026, 1, 12, 2, 5, 0).unwrap();
        assert_eq!(formatter.format_datetime(instant), "12/01/2026 02:05");
        assert!(formatter.legacy_offset_shift());
    }

    #[test]
    fn test_formatter_rejects_out_of_range_offset() {
        assert!(DateFormatter::new(24, false).is_none());
        assert!(DateFormatter::new(-24, false).is_none());
        assert!(DateFormatter::new(0, false).is_some());
    }

    #[test]
    fn test_format_long_date() {
        let formatter = DateFormatter::new(0, false).unwrap();
        let instant = Utc.with_ymd_and_hms(2026, 3, 13, 0, 0, 0).unwrap();
        assert_eq!(formatter.format_long_date(instant), "13 March 2026");
        let early = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
        assert_eq!(formatter.format_long_date(early), "05 January 2026");
    }

    #[test]
    fn test_relative_time_buckets() {
        let formatter = DateFormatter::default();
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();

        let ago = |minutes: i64| now - chrono::Duration::minutes(minutes);
        assert_eq!(formatter.format_relative_time(ago(0), now), "0 minutes ago");
        assert_eq!(formatter.format_relative_time(ago(1), now), "1 minute ago");
        assert_eq!(formatter.format_relative_time(ago(59), now), "59 minutes ago");
        assert_eq!(formatter.format_relative_time(ago(60), now), "1 hour ago");
        assert_eq!(formatter.format_relative_time(ago(23 * 60 + 59), now), "23 hours ago");
        assert_eq!(formatter.format_relative_time(ago(24 * 60), now), "1 day ago");
        assert_eq!(formatter.format_relative_time(ago(3 * 24 * 60), now), "3 days ago");
        assert_eq!(
            formatter.format_relative_time(ago(29 * 24 * 60), now),
            "29 days ago"
        );
    }

    #[test]
    fn test_relative_time_falls_back_to_date() {
        let formatter = DateFormatter::default();
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let old = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
        assert_eq!(formatter.format_relative_time(old, now), "01/04/2026");
    }

    #[test]
    fn test_relative_time_future_clamps_to_zero() {
        let formatter = DateFormatter::default();
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let later = now + chrono::Duration::hours(5);
        assert_eq!(formatter.format_relative_time(later, now), "0 minutes ago");
    }
}
