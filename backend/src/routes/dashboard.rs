use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::LaunchNumber;

// =========================================================
// Dashboard statistics types + routes
// =========================================================

/// Description reported when no launch exists.
pub const NO_LAUNCH_DESCRIPTION: &str = "none";

/// Description shown for a launch stored without one.
pub const MISSING_DESCRIPTION: &str = "no description";

/// The launch with the highest number.
///
/// Launch number 0 is the "no launch exists" sentinel and never a real launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentLaunch {
    pub launch_number: LaunchNumber,
    pub description: String,
}

impl CurrentLaunch {
    pub fn none() -> Self {
        Self {
            launch_number: LaunchNumber(0),
            description: NO_LAUNCH_DESCRIPTION.to_string(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.launch_number.value() == 0
    }
}

/// Identifies a dashboard statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticField {
    CurrentLaunch,
    DaysSinceLastDelivery,
    DaysSinceLastFabrication,
    TotalUnits,
    ActiveUnits,
}

/// Dashboard cards dataset.
///
/// Day counts and totals default to 0 when there is no data; the optional
/// companions tell "no data" apart from a real zero, and `degraded` names
/// the fields whose read failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStatistics {
    pub current_launch: CurrentLaunch,
    pub days_since_last_delivery: u64,
    pub days_since_last_fabrication: u64,
    pub total_units: u64,
    pub active_units: u64,
    pub last_delivery_at: Option<DateTime<Utc>>,
    pub last_fabricated_on: Option<NaiveDate>,
    #[serde(default)]
    pub degraded: Vec<StatisticField>,
}

impl DashboardStatistics {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Progress bar of a "days since" card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub days: u64,
    pub target_days: u64,
    /// `min(days / target * 100, 100)`
    pub percent: f64,
    pub label: String,
}

/// Statistics plus the presentation values of the four dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCards {
    pub statistics: DashboardStatistics,
    pub current_launch_label: String,
    pub delivery_gauge: Gauge,
    pub fabrication_gauge: Gauge,
    pub total_units_display: String,
    pub last_delivery_display: Option<String>,
}

/// Route path for raw dashboard statistics.
pub const GET_DASHBOARD_STATISTICS: &str = "/dashboard/statistics";
/// Route path for the dashboard cards.
pub const GET_DASHBOARD_CARDS: &str = "/dashboard/cards";
