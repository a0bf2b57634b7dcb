//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! data store service layer.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    ActivityPage, ActivityQuery, DashboardCards, DashboardStatistics, ForecastReport,
    HealthResponse, LaunchDetail, LaunchOverview, LaunchSummary,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::LaunchNumber;
use crate::db::services as db_services;
use crate::services::activity::{PageRequest, DEFAULT_PER_PAGE};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the data store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /v1/dashboard/statistics
pub async fn get_dashboard_statistics(
    State(state): State<AppState>,
) -> HandlerResult<DashboardStatistics> {
    let stats = db_services::fetch_dashboard_statistics(state.repository.as_ref(), state.now()).await;
    Ok(Json(stats))
}

/// GET /v1/dashboard/cards
pub async fn get_dashboard_cards(State(state): State<AppState>) -> HandlerResult<DashboardCards> {
    let cards = db_services::fetch_dashboard_cards(
        state.repository.as_ref(),
        &state.formatter,
        state.now(),
    )
    .await;
    Ok(Json(cards))
}

/// GET /v1/dashboard/forecast
///
/// Delivery forecast for the next twelve months.
pub async fn get_delivery_forecast(
    State(state): State<AppState>,
) -> HandlerResult<ForecastReport> {
    let report =
        db_services::fetch_forecast(state.repository.as_ref(), &state.formatter, state.now())
            .await;
    Ok(Json(report))
}

// =============================================================================
// Launches
// =============================================================================

/// GET /v1/launches
pub async fn list_launches(State(state): State<AppState>) -> HandlerResult<LaunchOverview> {
    let overview = db_services::fetch_launch_overview(state.repository.as_ref()).await?;
    Ok(Json(overview))
}

/// GET /v1/launches/summary
pub async fn get_launch_summary(State(state): State<AppState>) -> HandlerResult<LaunchSummary> {
    let summary = db_services::fetch_launch_summary(state.repository.as_ref()).await;
    Ok(Json(summary))
}

/// GET /v1/launches/{launch_number}
pub async fn get_launch_detail(
    State(state): State<AppState>,
    Path(launch_number): Path<i64>,
) -> HandlerResult<LaunchDetail> {
    if launch_number < 1 {
        return Err(AppError::BadRequest(format!(
            "Invalid launch number: {}",
            launch_number
        )));
    }

    let detail =
        db_services::fetch_launch_detail(state.repository.as_ref(), LaunchNumber::new(launch_number))
            .await?;
    Ok(Json(detail))
}

// =============================================================================
// Activity
// =============================================================================

/// GET /v1/activity?page=1&per_page=10
///
/// One page of the recent activity feed, newest first.
pub async fn get_recent_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> HandlerResult<ActivityPage> {
    let request = PageRequest::new(
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    )?;

    let page = db_services::fetch_activity_page(
        state.repository.as_ref(),
        request,
        &state.formatter,
        state.now(),
    )
    .await;
    Ok(Json(page))
}
