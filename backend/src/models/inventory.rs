//! Inventory entities read from the data store.
//!
//! These mirror the rows of the external store. Nothing in this crate creates
//! or mutates them; they only flow in from a repository and out as derived
//! display values.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Launch number (the store's primary key for a launch).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LaunchNumber(pub i64);

/// Launch-assignment identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AssignmentId(pub i64);

impl LaunchNumber {
    pub fn new(value: i64) -> Self {
        LaunchNumber(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// The number that follows this one, saturating at `i64::MAX`.
    pub fn next(&self) -> Self {
        LaunchNumber(self.0.saturating_add(1))
    }
}

impl AssignmentId {
    pub fn new(value: i64) -> Self {
        AssignmentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LaunchNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LaunchNumber> for i64 {
    fn from(id: LaunchNumber) -> Self {
        id.0
    }
}

impl From<AssignmentId> for i64 {
    fn from(id: AssignmentId) -> Self {
        id.0
    }
}

/// An operational deployment to which units are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub launch_number: LaunchNumber,
    pub description: Option<String>,
}

impl Launch {
    pub fn new(launch_number: i64, description: impl Into<String>) -> Self {
        Self {
            launch_number: LaunchNumber(launch_number),
            description: Some(description.into()),
        }
    }
}

/// A complete assembled SAASS unit.
///
/// Component serials reference the electronics, hydrophone, battery pack and
/// tube tables; any of them may be missing while a unit is being assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub serial_number: String,
    pub fabricated_on: Option<NaiveDate>,
    #[serde(default)]
    pub electronics_serial: Option<String>,
    #[serde(default)]
    pub hydrophone_serial: Option<String>,
    #[serde(default)]
    pub battery_pack_serial: Option<String>,
    #[serde(default)]
    pub tube_serial: Option<String>,
}

impl Unit {
    pub fn new(serial_number: impl Into<String>, fabricated_on: Option<NaiveDate>) -> Self {
        Self {
            serial_number: serial_number.into(),
            fabricated_on,
            electronics_serial: None,
            hydrophone_serial: None,
            battery_pack_serial: None,
            tube_serial: None,
        }
    }

    /// Fabrication record for this unit, if the date is known.
    pub fn fabrication(&self) -> Option<FabricationRecord> {
        self.fabricated_on.map(|fabricated_on| FabricationRecord {
            serial_number: self.serial_number.clone(),
            fabricated_on,
        })
    }
}

/// Fabrication date projection of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricationRecord {
    pub serial_number: String,
    pub fabricated_on: NaiveDate,
}

/// Association between a launch and a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchAssignment {
    pub assignment_id: AssignmentId,
    pub launch_number: LaunchNumber,
    pub unit_serial: String,
}

/// A unit handed off for a launch-assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub delivery_id: i64,
    pub assignment_id: AssignmentId,
    pub delivered_at: DateTime<Utc>,
}

/// A unit brought back from a launch-assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub return_id: i64,
    pub assignment_id: AssignmentId,
    pub returned_at: DateTime<Utc>,
}

/// A launch-assignment joined with its delivery and return events.
///
/// The store does not prevent several deliveries or returns per assignment,
/// so both are kept as lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentEvents {
    pub assignment: LaunchAssignment,
    pub deliveries: Vec<DateTime<Utc>>,
    pub returns: Vec<DateTime<Utc>>,
}

impl AssignmentEvents {
    pub fn new(assignment: LaunchAssignment) -> Self {
        Self {
            assignment,
            deliveries: Vec::new(),
            returns: Vec::new(),
        }
    }

    pub fn latest_delivery(&self) -> Option<DateTime<Utc>> {
        self.deliveries.iter().copied().max()
    }

    pub fn latest_return(&self) -> Option<DateTime<Utc>> {
        self.returns.iter().copied().max()
    }
}

/// One row of the system activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub log_id: i64,
    pub logged_at: DateTime<Utc>,
    pub module: String,
    /// Raw action code as stored (e.g. `entrega`).
    pub action: String,
    pub entity: String,
    /// Identifier of the affected record (a number or a serial).
    pub entity_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assignment(id: i64) -> LaunchAssignment {
        LaunchAssignment {
            assignment_id: AssignmentId(id),
            launch_number: LaunchNumber(7),
            unit_serial: format!("S-{}", id),
        }
    }

    #[test]
    fn test_launch_number_display_and_next() {
        let number = LaunchNumber::new(41);
        assert_eq!(number.to_string(), "L41");
        assert_eq!(number.next(), LaunchNumber(42));
        assert_eq!(i64::from(number), 41);
    }

    #[test]
    fn test_launch_number_next_saturates() {
        let last = LaunchNumber::new(i64::MAX);
        assert_eq!(last.next(), last);
    }

    #[test]
    fn test_unit_fabrication_projection() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let unit = Unit::new("SAASS-001", Some(date));
        let record = unit.fabrication().unwrap();
        assert_eq!(record.serial_number, "SAASS-001");
        assert_eq!(record.fabricated_on, date);

        assert!(Unit::new("SAASS-002", None).fabrication().is_none());
    }

    #[test]
    fn test_assignment_events_pick_latest() {
        let mut events = AssignmentEvents::new(assignment(1));
        assert!(events.latest_delivery().is_none());

        let early = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        events.deliveries = vec![late, early];
        events.returns = vec![early];

        assert_eq!(events.latest_delivery(), Some(late));
        assert_eq!(events.latest_return(), Some(early));
    }
}
