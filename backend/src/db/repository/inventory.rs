//! Inventory repository trait: launches, units and their assignments.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{FabricationRecord, Launch, LaunchNumber, Unit};

/// Read operations over launches and SAASS units.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the data store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store answers
    /// - `Ok(false)` if it is reachable but reports itself unhealthy
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Launches ====================

    /// All launches, in no particular order.
    async fn list_launches(&self) -> RepositoryResult<Vec<Launch>>;

    /// A single launch.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no launch has this number
    async fn get_launch(&self, launch_number: LaunchNumber) -> RepositoryResult<Launch>;

    /// The launch with the highest number, `None` when there are none.
    async fn latest_launch(&self) -> RepositoryResult<Option<Launch>>;

    /// Number of launches on record.
    async fn count_launches(&self) -> RepositoryResult<u64>;

    // ==================== Units ====================

    /// Number of complete SAASS units on record.
    async fn count_units(&self) -> RepositoryResult<u64>;

    /// Fabrication dates of every unit that has one.
    async fn list_fabrications(&self) -> RepositoryResult<Vec<FabricationRecord>>;

    /// Units with the given serial numbers. Unknown serials are skipped.
    async fn get_units(&self, serial_numbers: &[String]) -> RepositoryResult<Vec<Unit>>;
}
