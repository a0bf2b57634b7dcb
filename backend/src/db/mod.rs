//! Data store access for the dashboard.
//!
//! This module provides abstractions over the inventory store via the
//! Repository pattern, so the remote store and the in-memory store can be
//! swapped freely.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (HTTP handlers, CLI)                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Concurrent reads per screen                           │
//! │  - Degradation of failed dashboard reads                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Rest Repository  │     │ Local Repository        │
//! │ (PostgREST)      │     │ (in-memory)             │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! The module includes:
//! - `services`: screen-level read operations (use these in your application!)
//! - `repository`: trait definitions and the error type
//! - `repositories::rest`: remote tabular store over HTTP
//! - `repositories::local`: in-memory implementation for tests and local development
//! - `factory`: construction of repository instances
//!
//! # Recommended Usage
//!
//! ```no_run
//! use chrono::Utc;
//! use saass_dashboard::db::{services, RepositoryFactory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env()?;
//!     let stats = services::fetch_dashboard_statistics(repo.as_ref(), Utc::now()).await;
//!     println!("{} units", stats.total_units);
//!     Ok(())
//! }
//! ```

#[cfg(not(any(feature = "rest-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


// Rest config is colocated with the repository implementation.
#[cfg(feature = "rest-repo")]
pub use repositories::rest::{RequestStats, RestConfig};
#[cfg(not(feature = "rest-repo"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RestConfig {
    _private: (),
}

// ==================== Service Layer ====================

pub use services::{
    fetch_activity_page, fetch_dashboard_cards, fetch_dashboard_statistics, fetch_forecast,
    fetch_launch_detail, fetch_launch_overview, fetch_launch_summary, health_check,
};

// ==================== Repository Pattern Exports ====================

pub use repo_config::{DisplaySettings, RepositoryConfig};

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
#[cfg(feature = "rest-repo")]
pub use repositories::RestRepository;
pub use repository::{
    ActivityRepository, ActivitySlice, DeliveryRepository, ErrorContext, FullRepository,
    InventoryRepository, RepositoryError, RepositoryResult,
};
