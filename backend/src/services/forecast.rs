//! Rolling delivery forecast.
//!
//! Starting from the most recent delivery (or now, when none is recorded),
//! predicted deliveries follow at a fixed cadence until the horizon one year
//! ahead of now is reached.

use chrono::{DateTime, Duration, Months, Utc};

use crate::models::time::{DateFormatter, DAY_MS};
use crate::routes::forecast::{
    ForecastEntry, ForecastReport, ForecastRow, ForecastStatus, ForecastUrgency,
};

/// Days between consecutive predicted deliveries.
pub const FORECAST_INTERVAL_DAYS: i64 = 60;

/// Distance between now and the last admissible forecast.
pub const FORECAST_HORIZON_MONTHS: u32 = 12;

/// Upper bound (inclusive) of the imminent urgency band, in days.
pub const IMMINENT_WITHIN_DAYS: i64 = 30;

/// Upper bound (inclusive) of the approaching urgency band, in days.
pub const APPROACHING_WITHIN_DAYS: i64 = 60;

/// Latest instant a forecast may fall on, or `None` if not representable.
pub fn forecast_horizon(now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    now.checked_add_months(Months::new(FORECAST_HORIZON_MONTHS))
}

/// Generate the delivery forecast.
///
/// The anchor is `last_delivery`, or `now` when there is no delivery on
/// record. Entries are `anchor + k * 60 days` for `k = 1, 2, ...` while they
/// do not exceed the horizon. An anchor far in the past yields past-dated
/// entries; they are kept.
pub fn generate_forecasts(
    last_delivery: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Vec<ForecastEntry> {
    let Some(horizon) = forecast_horizon(now) else {
        return Vec::new();
    };

    let step = Duration::days(FORECAST_INTERVAL_DAYS);
    let mut cursor = last_delivery.unwrap_or(now);
    let mut entries = Vec::new();

    while cursor < horizon {
        cursor = match cursor.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
        if cursor > horizon {
            break;
        }

        let sequence_number = entries.len() as u32 + 1;
        entries.push(ForecastEntry {
            sequence_number,
            date: cursor,
            status: if sequence_number == 1 {
                ForecastStatus::Next
            } else {
                ForecastStatus::Future
            },
        });
    }

    entries
}

/// Signed whole days from `now` until `date`, rounded up.
pub fn days_until(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (date - now).num_milliseconds();
    -((-ms).div_euclid(DAY_MS))
}

/// Urgency band for a forecast `days` away.
pub fn classify_urgency(days: i64) -> ForecastUrgency {
    if days <= IMMINENT_WITHIN_DAYS {
        ForecastUrgency::Imminent
    } else if days <= APPROACHING_WITHIN_DAYS {
        ForecastUrgency::Approaching
    } else {
        ForecastUrgency::Scheduled
    }
}

/// Attach the table columns to each forecast entry.
pub fn annotate_forecasts(
    entries: Vec<ForecastEntry>,
    now: DateTime<Utc>,
    formatter: &DateFormatter,
) -> Vec<ForecastRow> {
    entries
        .into_iter()
        .map(|entry| {
            let days = days_until(entry.date, now);
            ForecastRow {
                display_date: formatter.format_long_date(entry.date),
                days_until: days,
                urgency: classify_urgency(days),
                entry,
            }
        })
        .collect()
}

/// Build the complete forecast dataset served to clients.
pub fn build_forecast_report(
    last_delivery: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    formatter: &DateFormatter,
) -> ForecastReport {
    let entries = generate_forecasts(last_delivery, now);
    ForecastReport {
        last_delivery,
        last_delivery_display: last_delivery.map(|at| formatter.format_datetime(at)),
        interval_days: FORECAST_INTERVAL_DAYS,
        horizon: forecast_horizon(now),
        rows: annotate_forecasts(entries, now, formatter),
    }
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod forecast_tests;
