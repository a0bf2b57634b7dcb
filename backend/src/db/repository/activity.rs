//! Activity log repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::ActivityLogEntry;

/// One slice of the activity log plus the total number of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitySlice {
    pub entries: Vec<ActivityLogEntry>,
    pub total: u64,
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Log entries newest first, skipping `offset` and returning at most `limit`.
    async fn fetch_activity(&self, offset: u64, limit: u64) -> RepositoryResult<ActivitySlice>;
}
