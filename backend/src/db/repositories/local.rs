//! In-memory local repository implementation.
//!
//! Stores every collection in memory, suitable for unit tests, local
//! development and demos seeded from a JSON fixture.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::api::*;
use crate::db::repository::activity::ActivitySlice;
use crate::db::repository::*;

/// Collections of the local store, used to inject read failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Launches,
    Units,
    Assignments,
    Deliveries,
    Activity,
}

/// JSON fixture accepted by [`LocalRepository::from_seed`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSeed {
    #[serde(default)]
    pub launches: Vec<Launch>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub assignments: Vec<LaunchAssignment>,
    #[serde(default)]
    pub deliveries: Vec<DeliveryRecord>,
    #[serde(default)]
    pub returns: Vec<ReturnRecord>,
    #[serde(default)]
    pub activity: Vec<ActivityLogEntry>,
}

/// In-memory local repository.
///
/// # Example
/// ```
/// use saass_dashboard::api::Launch;
/// use saass_dashboard::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// repo.insert_launch(Launch::new(1, "First launch"));
/// assert_eq!(repo.launch_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    launches: BTreeMap<LaunchNumber, Launch>,
    units: BTreeMap<String, Unit>,
    assignments: BTreeMap<AssignmentId, LaunchAssignment>,
    deliveries: Vec<DeliveryRecord>,
    returns: Vec<ReturnRecord>,
    activity: Vec<ActivityLogEntry>,

    // Connection health
    is_healthy: bool,
    failing: HashSet<Collection>,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            launches: BTreeMap::new(),
            units: BTreeMap::new(),
            assignments: BTreeMap::new(),
            deliveries: Vec::new(),
            returns: Vec::new(),
            activity: Vec::new(),
            is_healthy: true,
            failing: HashSet::new(),
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated from a fixture.
    pub fn from_seed(seed: LocalSeed) -> Self {
        let repo = Self::new();
        repo.load_seed(seed);
        repo
    }

    /// Create a repository from a JSON fixture file.
    pub fn from_seed_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Cannot read seed file: {}", e),
                ErrorContext::new("load_seed").with_details(path.display().to_string()),
            )
        })?;
        let seed: LocalSeed = serde_json::from_str(&text)
            .map_err(|e| RepositoryError::from(e).with_operation("load_seed"))?;
        log::info!(
            "Loaded local seed from {} ({} launches, {} units)",
            path.display(),
            seed.launches.len(),
            seed.units.len()
        );
        Ok(Self::from_seed(seed))
    }

    /// Add every record of `seed` to the store.
    pub fn load_seed(&self, seed: LocalSeed) {
        let mut data = self.data.write();
        for launch in seed.launches {
            data.launches.insert(launch.launch_number, launch);
        }
        for unit in seed.units {
            data.units.insert(unit.serial_number.clone(), unit);
        }
        for assignment in seed.assignments {
            data.assignments.insert(assignment.assignment_id, assignment);
        }
        data.deliveries.extend(seed.deliveries);
        data.returns.extend(seed.returns);
        data.activity.extend(seed.activity);
    }

    pub fn insert_launch(&self, launch: Launch) {
        self.data.write().launches.insert(launch.launch_number, launch);
    }

    pub fn insert_unit(&self, unit: Unit) {
        self.data
            .write()
            .units
            .insert(unit.serial_number.clone(), unit);
    }

    pub fn insert_assignment(&self, assignment: LaunchAssignment) {
        self.data
            .write()
            .assignments
            .insert(assignment.assignment_id, assignment);
    }

    pub fn insert_delivery(&self, delivery: DeliveryRecord) {
        self.data.write().deliveries.push(delivery);
    }

    pub fn insert_return(&self, record: ReturnRecord) {
        self.data.write().returns.push(record);
    }

    pub fn insert_activity(&self, entry: ActivityLogEntry) {
        self.data.write().activity.push(entry);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Make every read of `collection` fail with a connection error.
    pub fn fail_collection(&self, collection: Collection) {
        self.data.write().failing.insert(collection);
    }

    /// Undo [`fail_collection`](Self::fail_collection).
    pub fn restore_collection(&self, collection: Collection) {
        self.data.write().failing.remove(&collection);
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn launch_count(&self) -> usize {
        self.data.read().launches.len()
    }

    /// Helper to check health and return error if the collection is unavailable.
    fn check(&self, collection: Collection, operation: &str) -> RepositoryResult<()> {
        let data = self.data.read();
        if !data.is_healthy || data.failing.contains(&collection) {
            return Err(RepositoryError::connection_with_context(
                "Local store is not healthy",
                ErrorContext::new(operation).with_entity(format!("{:?}", collection)),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_launches(&self) -> RepositoryResult<Vec<Launch>> {
        self.check(Collection::Launches, "list_launches")?;
        Ok(self.data.read().launches.values().cloned().collect())
    }

    async fn get_launch(&self, launch_number: LaunchNumber) -> RepositoryResult<Launch> {
        self.check(Collection::Launches, "get_launch")?;
        self.data
            .read()
            .launches
            .get(&launch_number)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Launch {} not found", launch_number.value()),
                    ErrorContext::new("get_launch")
                        .with_entity("launch")
                        .with_entity_id(launch_number.value()),
                )
            })
    }

    async fn latest_launch(&self) -> RepositoryResult<Option<Launch>> {
        self.check(Collection::Launches, "latest_launch")?;
        Ok(self.data.read().launches.values().next_back().cloned())
    }

    async fn count_launches(&self) -> RepositoryResult<u64> {
        self.check(Collection::Launches, "count_launches")?;
        Ok(self.data.read().launches.len() as u64)
    }

    async fn count_units(&self) -> RepositoryResult<u64> {
        self.check(Collection::Units, "count_units")?;
        Ok(self.data.read().units.len() as u64)
    }

    async fn list_fabrications(&self) -> RepositoryResult<Vec<FabricationRecord>> {
        self.check(Collection::Units, "list_fabrications")?;
        Ok(self
            .data
            .read()
            .units
            .values()
            .filter_map(Unit::fabrication)
            .collect())
    }

    async fn get_units(&self, serial_numbers: &[String]) -> RepositoryResult<Vec<Unit>> {
        self.check(Collection::Units, "get_units")?;
        let data = self.data.read();
        Ok(serial_numbers
            .iter()
            .filter_map(|serial| data.units.get(serial).cloned())
            .collect())
    }
}

#[async_trait]
impl DeliveryRepository for LocalRepository {
    async fn latest_delivery(&self) -> RepositoryResult<Option<DateTime<Utc>>> {
        self.check(Collection::Deliveries, "latest_delivery")?;
        Ok(self
            .data
            .read()
            .deliveries
            .iter()
            .map(|d| d.delivered_at)
            .max())
    }

    async fn oldest_delivery(&self) -> RepositoryResult<Option<OldestRecord>> {
        self.check(Collection::Deliveries, "oldest_delivery")?;
        let data = self.data.read();
        Ok(data
            .deliveries
            .iter()
            .filter_map(|d| {
                data.assignments
                    .get(&d.assignment_id)
                    .map(|a| OldestRecord {
                        launch_number: a.launch_number,
                        delivered_at: d.delivered_at,
                    })
            })
            .min_by_key(|record| record.delivered_at))
    }

    async fn list_assignment_events(
        &self,
        launch_number: Option<LaunchNumber>,
    ) -> RepositoryResult<Vec<AssignmentEvents>> {
        self.check(Collection::Assignments, "list_assignment_events")?;
        self.check(Collection::Deliveries, "list_assignment_events")?;
        let data = self.data.read();

        Ok(data
            .assignments
            .values()
            .filter(|a| match launch_number {
                Some(n) => a.launch_number == n,
                None => true,
            })
            .map(|a| {
                let mut events = AssignmentEvents::new(a.clone());
                events.deliveries = data
                    .deliveries
                    .iter()
                    .filter(|d| d.assignment_id == a.assignment_id)
                    .map(|d| d.delivered_at)
                    .collect();
                events.returns = data
                    .returns
                    .iter()
                    .filter(|r| r.assignment_id == a.assignment_id)
                    .map(|r| r.returned_at)
                    .collect();
                events
            })
            .collect())
    }
}

#[async_trait]
impl ActivityRepository for LocalRepository {
    async fn fetch_activity(&self, offset: u64, limit: u64) -> RepositoryResult<ActivitySlice> {
        self.check(Collection::Activity, "fetch_activity")?;
        let data = self.data.read();

        let mut entries: Vec<&ActivityLogEntry> = data.activity.iter().collect();
        entries.sort_by(|a, b| {
            b.logged_at
                .cmp(&a.logged_at)
                .then_with(|| b.log_id.cmp(&a.log_id))
        });

        Ok(ActivitySlice {
            total: entries.len() as u64,
            entries: entries
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn seeded() -> LocalRepository {
        let repo = LocalRepository::new();
        repo.insert_launch(Launch::new(1, "first"));
        repo.insert_launch(Launch::new(2, "second"));
        repo.insert_unit(Unit::new("S1", NaiveDate::from_ymd_opt(2024, 1, 1)));
        repo.insert_unit(Unit::new("S2", None));
        repo.insert_assignment(LaunchAssignment {
            assignment_id: AssignmentId(10),
            launch_number: LaunchNumber(2),
            unit_serial: "S1".to_string(),
        });
        repo.insert_delivery(DeliveryRecord {
            delivery_id: 1,
            assignment_id: AssignmentId(10),
            delivered_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        });
        repo
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        assert!(repo.list_launches().await.is_err());
    }

    #[tokio::test]
    async fn test_latest_launch_and_counts() {
        let repo = seeded();
        let latest = repo.latest_launch().await.unwrap().unwrap();
        assert_eq!(latest.launch_number, LaunchNumber(2));
        assert_eq!(repo.count_launches().await.unwrap(), 2);
        assert_eq!(repo.count_units().await.unwrap(), 2);
        assert_eq!(repo.list_fabrications().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_error() {
        let repo = LocalRepository::new();
        let result = repo.get_launch(LaunchNumber(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_failure_injection_is_per_collection() {
        let repo = seeded();
        repo.fail_collection(Collection::Units);
        assert!(repo.count_units().await.is_err());
        assert!(repo.count_launches().await.is_ok());

        repo.restore_collection(Collection::Units);
        assert!(repo.count_units().await.is_ok());
    }

    #[tokio::test]
    async fn test_oldest_delivery_resolves_launch() {
        let repo = seeded();
        let oldest = repo.oldest_delivery().await.unwrap().unwrap();
        assert_eq!(oldest.launch_number, LaunchNumber(2));
    }

    #[tokio::test]
    async fn test_clear_keeps_health() {
        let repo = seeded();
        repo.set_healthy(false);
        repo.clear();
        assert_eq!(repo.launch_count(), 0);
        assert!(!repo.health_check().await.unwrap());
    }
}
