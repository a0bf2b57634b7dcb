//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{activity, dashboard, forecast, launches};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The dashboard is a read-only public client
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Dashboard cards
        .route(
            dashboard::GET_DASHBOARD_STATISTICS,
            get(handlers::get_dashboard_statistics),
        )
        .route(dashboard::GET_DASHBOARD_CARDS, get(handlers::get_dashboard_cards))
        .route(forecast::GET_DELIVERY_FORECAST, get(handlers::get_delivery_forecast))
        // Launches
        .route(launches::LIST_LAUNCHES, get(handlers::list_launches))
        .route(launches::GET_LAUNCH_SUMMARY, get(handlers::get_launch_summary))
        .route(launches::GET_LAUNCH_DETAIL, get(handlers::get_launch_detail))
        // Activity feed
        .route(activity::GET_RECENT_ACTIVITY, get(handlers::get_recent_activity));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
