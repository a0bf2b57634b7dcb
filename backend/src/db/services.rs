//! High-level data store service layer.
//!
//! Repository-agnostic operations that fetch what each dashboard screen
//! needs and hand it to the pure computations in [`crate::services`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers                                          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Concurrent independent reads                         │
//! │  - Degradation of failed dashboard reads                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Rest Repository  │     │ Local Repository        │
//! │ (remote store)   │     │ (in-memory)             │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! Dashboard-type reads never fail: a read that errors is logged at `warn`
//! and its field falls back to its default. Table and detail reads
//! propagate [`RepositoryError`](super::RepositoryError).
//!
//! # Usage
//!
//! ```no_run
//! use chrono::Utc;
//! use saass_dashboard::db::{repositories::LocalRepository, services};
//!
//! #[tokio::main]
//! async fn main() {
//!     let repo = LocalRepository::new();
//!     let stats = services::fetch_dashboard_statistics(&repo, Utc::now()).await;
//!     println!("current launch: {}", stats.current_launch.launch_number);
//! }
//! ```

use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::repository::{FullRepository, RepositoryResult};
use crate::api::{
    ActivityPage, DashboardCards, DashboardStatistics, ForecastReport, LaunchDetail,
    LaunchNumber, LaunchOverview, LaunchSummary, StatisticField,
};
use crate::models::time::DateFormatter;
use crate::services::activity::{build_activity_page, empty_page, PageRequest};
use crate::services::forecast::build_forecast_report;
use crate::services::launches::{build_launch_detail, build_launch_overview, summarize_launches};
use crate::services::statistics::{build_dashboard_cards, compute_statistics, count_active};

/// Keep the value of a successful read; log and record `field` otherwise.
fn or_degraded<T, F>(result: RepositoryResult<T>, field: F, degraded: &mut Vec<F>) -> Option<T>
where
    F: std::fmt::Debug + Copy,
{
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Degrading {:?} to its default: {}", field, e);
            degraded.push(field);
            None
        }
    }
}

/// Check that the data store is reachable.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Statistics for the dashboard cards.
///
/// The five reads run concurrently; each failure only affects its own field.
pub async fn fetch_dashboard_statistics<R: FullRepository + ?Sized>(
    repo: &R,
    now: DateTime<Utc>,
) -> DashboardStatistics {
    let (latest_launch, latest_delivery, fabrications, total_units, assignments) = tokio::join!(
        repo.latest_launch(),
        repo.latest_delivery(),
        repo.list_fabrications(),
        repo.count_units(),
        repo.list_assignment_events(None),
    );

    let mut degraded = Vec::new();
    let launches: Vec<_> = or_degraded(latest_launch, StatisticField::CurrentLaunch, &mut degraded)
        .flatten()
        .into_iter()
        .collect();
    let deliveries: Vec<_> = or_degraded(
        latest_delivery,
        StatisticField::DaysSinceLastDelivery,
        &mut degraded,
    )
    .flatten()
    .into_iter()
    .collect();
    let fabrications = or_degraded(
        fabrications,
        StatisticField::DaysSinceLastFabrication,
        &mut degraded,
    )
    .unwrap_or_default();
    let total_units =
        or_degraded(total_units, StatisticField::TotalUnits, &mut degraded).unwrap_or(0);
    let active_units = or_degraded(assignments, StatisticField::ActiveUnits, &mut degraded)
        .map(|events| count_active(&events))
        .unwrap_or(0);

    let mut statistics = compute_statistics(&launches, &deliveries, &fabrications, total_units, now);
    statistics.active_units = active_units;
    statistics.degraded = degraded;

    debug!(
        "Dashboard statistics: launch={} units={} active={} degraded={:?}",
        statistics.current_launch.launch_number,
        statistics.total_units,
        statistics.active_units,
        statistics.degraded
    );
    statistics
}

/// Statistics plus their card presentation.
pub async fn fetch_dashboard_cards<R: FullRepository + ?Sized>(
    repo: &R,
    formatter: &DateFormatter,
    now: DateTime<Utc>,
) -> DashboardCards {
    let statistics = fetch_dashboard_statistics(repo, now).await;
    build_dashboard_cards(statistics, formatter)
}

/// Delivery forecast anchored on the latest delivery.
///
/// If the latest delivery cannot be read the forecast is anchored on `now`.
pub async fn fetch_forecast<R: FullRepository + ?Sized>(
    repo: &R,
    formatter: &DateFormatter,
    now: DateTime<Utc>,
) -> ForecastReport {
    let last_delivery = match repo.latest_delivery().await {
        Ok(last) => last,
        Err(e) => {
            warn!("Cannot read latest delivery, anchoring forecast on now: {}", e);
            None
        }
    };
    build_forecast_report(last_delivery, now, formatter)
}

/// The launch table.
pub async fn fetch_launch_overview<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<LaunchOverview> {
    let (launches, assignments) = tokio::join!(repo.list_launches(), repo.list_assignment_events(None));
    let rows = build_launch_overview(&launches?, &assignments?);
    Ok(LaunchOverview {
        total: rows.len(),
        launches: rows,
    })
}

/// Summary cards of the launches screen.
pub async fn fetch_launch_summary<R: FullRepository + ?Sized>(repo: &R) -> LaunchSummary {
    let (total, oldest, assignments, latest) = tokio::join!(
        repo.count_launches(),
        repo.oldest_delivery(),
        repo.list_assignment_events(None),
        repo.latest_launch(),
    );

    let mut degraded = Vec::new();
    let total = or_degraded(total, "total_launches", &mut degraded).unwrap_or(0);
    let oldest = or_degraded(oldest, "oldest_record", &mut degraded).flatten();
    let assignments = or_degraded(assignments, "active_units", &mut degraded).unwrap_or_default();
    let max_launch = or_degraded(latest, "next_launch_number", &mut degraded)
        .flatten()
        .map(|launch| launch.launch_number);

    let mut summary = summarize_launches(total, oldest, &assignments, max_launch);
    summary.degraded = degraded.into_iter().map(str::to_string).collect();
    summary
}

/// A launch with its assignments and units.
///
/// # Returns
/// * `Err(RepositoryError::NotFound)` - If the launch does not exist
pub async fn fetch_launch_detail<R: FullRepository + ?Sized>(
    repo: &R,
    launch_number: LaunchNumber,
) -> RepositoryResult<LaunchDetail> {
    let (launch, assignments) = tokio::join!(
        repo.get_launch(launch_number),
        repo.list_assignment_events(Some(launch_number)),
    );
    let launch = launch?;
    let assignments = assignments?;

    let mut serials: Vec<String> = assignments
        .iter()
        .map(|a| a.assignment.unit_serial.clone())
        .collect();
    serials.sort();
    serials.dedup();
    let units = repo.get_units(&serials).await?;

    Ok(build_launch_detail(&launch, &assignments, &units))
}

/// One page of the recent activity feed; empty when the log cannot be read.
pub async fn fetch_activity_page<R: FullRepository + ?Sized>(
    repo: &R,
    request: PageRequest,
    formatter: &DateFormatter,
    now: DateTime<Utc>,
) -> ActivityPage {
    match repo
        .fetch_activity(request.offset(), request.per_page() as u64)
        .await
    {
        Ok(slice) => build_activity_page(slice.entries, slice.total, request, formatter, now),
        Err(e) => {
            warn!("Cannot read activity log page {}: {}", request.page(), e);
            empty_page(request)
        }
    }
}
