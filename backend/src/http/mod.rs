//! HTTP server module for the dashboard backend.
//!
//! This module provides an axum-based HTTP server that exposes the dashboard
//! datasets as a read-only JSON API. It reuses the service layer, the
//! repository pattern and the route DTOs from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing and validation                           │
//! │  - JSON serialization                                     │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (db/services.rs)                           │
//! │  - Concurrent reads, degradation                          │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - RestRepository / LocalRepository                       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Endpoints
//!
//! | Method | Path                           | Body                    |
//! |--------|--------------------------------|-------------------------|
//! | GET    | `/health`                      | `HealthResponse`        |
//! | GET    | `/v1/dashboard/statistics`     | `DashboardStatistics`   |
//! | GET    | `/v1/dashboard/cards`          | `DashboardCards`        |
//! | GET    | `/v1/dashboard/forecast`       | `ForecastReport`        |
//! | GET    | `/v1/launches`                 | `LaunchOverview`        |
//! | GET    | `/v1/launches/summary`         | `LaunchSummary`         |
//! | GET    | `/v1/launches/{launch_number}` | `LaunchDetail`          |
//! | GET    | `/v1/activity`                 | `ActivityPage`          |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
