//! Application state for the HTTP server.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::models::time::DateFormatter;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for data store reads
    pub repository: Arc<dyn FullRepository>,
    /// Display formatter for dates in responses
    pub formatter: DateFormatter,
    clock: fn() -> DateTime<Utc>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn FullRepository>, formatter: DateFormatter) -> Self {
        Self {
            repository,
            formatter,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock, so responses can be computed at a fixed instant.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Current instant as seen by the handlers.
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
