//! Repository trait definitions for data store reads.
//!
//! Responsibilities are split across focused traits:
//!
//! - [`error`]: Error types for repository operations
//! - [`inventory`]: Launches, units and launch-assignments
//! - [`deliveries`]: Delivery and return events
//! - [`activity`]: The system activity log
//!
//! # Convenience Trait Bound
//!
//! Functions that need every capability take the [`FullRepository`] bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let launches = repo.list_launches().await?;
//!     let latest = repo.latest_delivery().await?;
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod deliveries;
pub mod error;
pub mod inventory;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use activity::{ActivityRepository, ActivitySlice};
pub use deliveries::DeliveryRepository;
pub use inventory::InventoryRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all three
/// repository traits.
pub trait FullRepository: InventoryRepository + DeliveryRepository + ActivityRepository {}

impl<T> FullRepository for T where T: InventoryRepository + DeliveryRepository + ActivityRepository {}
