use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{AssignmentId, LaunchNumber, Unit};

// =========================================================
// Launch screens types + routes
// =========================================================

/// Lifecycle of a launch-assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// No delivery recorded yet.
    NotDelivered,
    /// Delivered and not yet returned.
    Active,
    /// Delivered and returned.
    Completed,
}

/// One row of the launch table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchOverviewRow {
    pub launch_number: LaunchNumber,
    pub label: String,
    pub description: String,
    pub unit_count: u64,
    pub latest_delivery: Option<DateTime<Utc>>,
    pub latest_return: Option<DateTime<Utc>>,
}

/// The launch table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchOverview {
    pub launches: Vec<LaunchOverviewRow>,
    pub total: usize,
}

/// Earliest delivery on record and the launch it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OldestRecord {
    pub launch_number: LaunchNumber,
    pub delivered_at: DateTime<Utc>,
}

/// Summary cards of the launches screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchSummary {
    pub total_launches: u64,
    pub oldest_record: Option<OldestRecord>,
    pub active_units: u64,
    pub next_launch_number: LaunchNumber,
    #[serde(default)]
    pub degraded: Vec<String>,
}

/// An assignment as listed on the launch detail screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDetail {
    pub assignment_id: AssignmentId,
    pub unit_serial: String,
    pub unit: Option<Unit>,
    pub latest_delivery: Option<DateTime<Utc>>,
    pub latest_return: Option<DateTime<Utc>>,
    pub status: AssignmentStatus,
}

/// A launch with its assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchDetail {
    pub launch_number: LaunchNumber,
    pub label: String,
    pub description: String,
    pub assignments: Vec<AssignmentDetail>,
    pub active_units: u64,
}

/// Route path for the launch table.
pub const LIST_LAUNCHES: &str = "/launches";
/// Route path for the launch summary cards.
pub const GET_LAUNCH_SUMMARY: &str = "/launches/summary";
/// Route path for one launch.
pub const GET_LAUNCH_DETAIL: &str = "/launches/{launch_number}";
