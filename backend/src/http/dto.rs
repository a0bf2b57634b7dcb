//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies are the route types re-exported from [`crate::api`];
//! only request-side and server-specific shapes live here.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    // Dashboard
    DashboardCards, DashboardStatistics,
    // Forecast
    ForecastReport,
    // Launches
    LaunchDetail, LaunchOverview, LaunchSummary,
    // Activity
    ActivityPage,
};

/// Query parameters for the activity endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActivityQuery {
    /// 1-based page number (default: 1)
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (default: 10)
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Data store connection status
    pub database: String,
}
