//! Date handling shared by the dashboard computations.
//!
//! Two separate concerns live here:
//!
//! - **Arithmetic** ([`days_since`], [`days_between`], [`parse_instant`]) works on
//!   raw UTC instants only.
//! - **Display** ([`DateFormatter`]) renders instants in a fixed offset
//!   (UTC-3 by default) using day/month/year order and a 24-hour clock.
//!
//! Display values must never feed back into arithmetic.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 86_400_000;

/// Default display offset in hours (Brazil, UTC-3, no DST).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -3;

/// Shift applied by the legacy formatter before converting to the display zone.
const LEGACY_SHIFT_HOURS: i64 = 3;

/// Whole days between two instants, rounded up: `ceil(|b - a| / 1 day)`.
pub fn days_between_instants(a: DateTime<Utc>, b: DateTime<Utc>) -> u64 {
    let ms = (b - a).num_milliseconds().unsigned_abs();
    ms.div_ceil(DAY_MS as u64)
}

/// Whole days elapsed since `instant`, rounded up.
pub fn days_since(instant: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    days_between_instants(instant, now)
}

/// Whole days between two textual dates.
///
/// Returns `None` when either side does not parse.
pub fn days_between(a: &str, b: &str) -> Option<u64> {
    Some(days_between_instants(parse_instant(a)?, parse_instant(b)?))
}

/// Midnight UTC of a calendar date.
pub fn date_to_instant(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// Parse an instant as the data store emits it.
///
/// Accepts RFC 3339 (`2026-01-12T10:00:00Z`, `...+00:00`), naive ISO
/// timestamps (`2026-01-12T10:00:00`, `2026-01-12 10:00:00.123`) which are
/// taken as UTC, and plain dates (`2026-01-12`) which map to midnight UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // Postgres `timestamptz` text form: `2026-01-12 10:00:00+00`
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(date_to_instant)
}

/// Whether `value` parses as an instant or date.
pub fn is_valid_date(value: &str) -> bool {
    parse_instant(value).is_some()
}

/// Format a count with `.` as the thousands separator (`1.234.567`).
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Display formatter for instants.
///
/// With `legacy_offset_shift` set, instants are moved forward three hours
/// before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    offset: FixedOffset,
    legacy_offset_shift: bool,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            offset: offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|| Utc.fix()),
            legacy_offset_shift: false,
        }
    }
}

fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

impl DateFormatter {
    /// Create a formatter for a whole-hour UTC offset.
    ///
    /// Returns `None` if the offset is outside ±23 hours.
    pub fn new(utc_offset_hours: i32, legacy_offset_shift: bool) -> Option<Self> {
        Some(Self {
            offset: offset_from_hours(utc_offset_hours)?,
            legacy_offset_shift,
        })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn legacy_offset_shift(&self) -> bool {
        self.legacy_offset_shift
    }

    fn display_shift(&self) -> Duration {
        if self.legacy_offset_shift {
            Duration::hours(LEGACY_SHIFT_HOURS)
        } else {
            Duration::zero()
        }
    }

    fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        (instant + self.display_shift()).with_timezone(&self.offset)
    }

    /// `DD/MM/YYYY`
    pub fn format_date(&self, instant: DateTime<Utc>) -> String {
        self.local(instant).format("%d/%m/%Y").to_string()
    }

    /// `DD/MM/YYYY HH:MM`
    pub fn format_datetime(&self, instant: DateTime<Utc>) -> String {
        self.local(instant).format("%d/%m/%Y %H:%M").to_string()
    }

    /// `DD/MM`
    pub fn format_date_short(&self, instant: DateTime<Utc>) -> String {
        self.local(instant).format("%d/%m").to_string()
    }

    /// `HH:MM`
    pub fn format_time(&self, instant: DateTime<Utc>) -> String {
        self.local(instant).format("%H:%M").to_string()
    }

    /// `13 March 2026`
    pub fn format_long_date(&self, instant: DateTime<Utc>) -> String {
        self.local(instant).format("%d %B %Y").to_string()
    }

    /// Calendar date formatter (`DD/MM/YYYY`) with no zone conversion.
    pub fn format_calendar_date(&self, date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    /// Relative description of how long ago `instant` was.
    ///
    /// Buckets: minutes below one hour, hours below one day, days below 30
    /// days, then the absolute date.
    pub fn format_relative_time(&self, instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let elapsed_ms = (now - (instant + self.display_shift()))
            .num_milliseconds()
            .max(0);
        let minutes = elapsed_ms / 60_000;
        let hours = elapsed_ms / 3_600_000;
        let days = elapsed_ms / DAY_MS;

        if minutes < 60 {
            plural(minutes, "minute")
        } else if hours < 24 {
            plural(hours, "hour")
        } else if days < 30 {
            plural(days, "day")
        } else {
            self.format_date(instant)
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {} ago", n, unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
