//! Pure computations behind the dashboard screens.
//!
//! Services here take already fetched data and an injected `now`; reading
//! from the data store is the job of [`crate::db::services`].

pub mod activity;
pub mod forecast;
pub mod launches;
pub mod statistics;

pub use activity::{build_activity_page, page_window, PageRequest, PagingError};
pub use forecast::{annotate_forecasts, build_forecast_report, generate_forecasts};
pub use launches::{build_launch_detail, build_launch_overview, summarize_launches};
pub use statistics::{
    build_dashboard_cards, classify_assignment, compute_statistics, count_active,
};
