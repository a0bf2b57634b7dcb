use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =========================================================
// Delivery forecast types + route
// =========================================================

/// Position of a forecast entry in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastStatus {
    /// The first predicted delivery.
    Next,
    /// Any later predicted delivery.
    Future,
}

/// A predicted delivery date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub sequence_number: u32,
    pub date: DateTime<Utc>,
    pub status: ForecastStatus,
}

/// How close a predicted delivery is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastUrgency {
    /// 30 days or less away (including past-dated entries).
    Imminent,
    /// Between 31 and 60 days away.
    Approaching,
    /// More than 60 days away.
    Scheduled,
}

/// Forecast entry with the columns the forecast table shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    #[serde(flatten)]
    pub entry: ForecastEntry,
    /// Signed: negative for forecasts already in the past.
    pub days_until: i64,
    pub urgency: ForecastUrgency,
    pub display_date: String,
}

/// Complete forecast dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Most recent recorded delivery; `None` means the forecast is anchored on now.
    pub last_delivery: Option<DateTime<Utc>>,
    pub last_delivery_display: Option<String>,
    pub interval_days: i64,
    pub horizon: Option<DateTime<Utc>>,
    pub rows: Vec<ForecastRow>,
}

/// Route path for the delivery forecast.
pub const GET_DELIVERY_FORECAST: &str = "/dashboard/forecast";
