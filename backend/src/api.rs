//! Public API surface of the dashboard backend.
//!
//! This file consolidates the domain entities and the DTO types served over
//! HTTP. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::inventory::ActivityLogEntry;
pub use crate::models::inventory::AssignmentEvents;
pub use crate::models::inventory::AssignmentId;
pub use crate::models::inventory::DeliveryRecord;
pub use crate::models::inventory::FabricationRecord;
pub use crate::models::inventory::Launch;
pub use crate::models::inventory::LaunchAssignment;
pub use crate::models::inventory::LaunchNumber;
pub use crate::models::inventory::ReturnRecord;
pub use crate::models::inventory::Unit;
pub use crate::models::time::DateFormatter;
pub use crate::routes::activity::ActivityAction;
pub use crate::routes::activity::ActivityItem;
pub use crate::routes::activity::ActivityPage;
pub use crate::routes::dashboard::CurrentLaunch;
pub use crate::routes::dashboard::DashboardCards;
pub use crate::routes::dashboard::DashboardStatistics;
pub use crate::routes::dashboard::Gauge;
pub use crate::routes::dashboard::StatisticField;
pub use crate::routes::forecast::ForecastEntry;
pub use crate::routes::forecast::ForecastReport;
pub use crate::routes::forecast::ForecastRow;
pub use crate::routes::forecast::ForecastStatus;
pub use crate::routes::forecast::ForecastUrgency;
pub use crate::routes::launches::AssignmentDetail;
pub use crate::routes::launches::AssignmentStatus;
pub use crate::routes::launches::LaunchDetail;
pub use crate::routes::launches::LaunchOverview;
pub use crate::routes::launches::LaunchOverviewRow;
pub use crate::routes::launches::LaunchSummary;
pub use crate::routes::launches::OldestRecord;

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
