//! Delivery and return events per launch-assignment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::api::{AssignmentEvents, LaunchNumber, OldestRecord};

/// Read operations over the delivery/return lifecycle.
#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    /// Timestamp of the most recent delivery, `None` when none is recorded.
    async fn latest_delivery(&self) -> RepositoryResult<Option<DateTime<Utc>>>;

    /// The earliest delivery together with the launch it belongs to.
    async fn oldest_delivery(&self) -> RepositoryResult<Option<OldestRecord>>;

    /// Launch-assignments joined with their delivery and return instants.
    ///
    /// # Arguments
    /// * `launch_number` - Restrict to one launch, or `None` for all of them
    async fn list_assignment_events(
        &self,
        launch_number: Option<LaunchNumber>,
    ) -> RepositoryResult<Vec<AssignmentEvents>>;
}
