use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =========================================================
// Recent activity types + route
// =========================================================

/// Kind of action recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Create,
    Edit,
    Delete,
    Associate,
    Delivery,
    Return,
    Other,
}

/// One item of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub log_id: i64,
    pub action: ActivityAction,
    pub title: String,
    pub description: String,
    pub logged_at: DateTime<Utc>,
    pub time_ago: String,
}

/// A page of the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPage {
    pub items: Vec<ActivityItem>,
    pub page: u32,
    pub per_page: u32,
    pub total_records: u64,
    pub total_pages: u32,
    /// Page numbers for the pagination control.
    pub page_window: Vec<u32>,
}

/// Route path for the recent activity feed.
pub const GET_RECENT_ACTIVITY: &str = "/activity";
