//! Read models of the launch screens: the launch table, the summary cards
//! and the per-launch detail.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::inventory::{AssignmentEvents, Launch, LaunchNumber, Unit};
use crate::routes::dashboard::MISSING_DESCRIPTION;
use crate::routes::launches::{
    AssignmentDetail, LaunchDetail, LaunchOverviewRow, LaunchSummary, OldestRecord,
};
use crate::services::statistics::{classify_assignment, count_active};

fn describe(launch: &Launch) -> String {
    launch
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| MISSING_DESCRIPTION.to_string())
}

fn latest<'a, I>(instants: I) -> Option<DateTime<Utc>>
where
    I: Iterator<Item = &'a DateTime<Utc>>,
{
    instants.copied().max()
}

/// One row per launch, highest launch number first.
pub fn build_launch_overview(
    launches: &[Launch],
    assignments: &[AssignmentEvents],
) -> Vec<LaunchOverviewRow> {
    let mut by_launch: HashMap<LaunchNumber, Vec<&AssignmentEvents>> = HashMap::new();
    for events in assignments {
        by_launch
            .entry(events.assignment.launch_number)
            .or_default()
            .push(events);
    }

    let mut rows: Vec<LaunchOverviewRow> = launches
        .iter()
        .map(|launch| {
            let own = by_launch
                .get(&launch.launch_number)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            LaunchOverviewRow {
                launch_number: launch.launch_number,
                label: launch.launch_number.to_string(),
                description: describe(launch),
                unit_count: own.len() as u64,
                latest_delivery: latest(own.iter().flat_map(|e| e.deliveries.iter())),
                latest_return: latest(own.iter().flat_map(|e| e.returns.iter())),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.launch_number.cmp(&a.launch_number));
    rows
}

/// A launch with its assignments, their units and lifecycle status.
///
/// Assignments belonging to other launches are ignored.
pub fn build_launch_detail(
    launch: &Launch,
    assignments: &[AssignmentEvents],
    units: &[Unit],
) -> LaunchDetail {
    let units: HashMap<&str, &Unit> = units
        .iter()
        .map(|unit| (unit.serial_number.as_str(), unit))
        .collect();

    let own: Vec<AssignmentEvents> = assignments
        .iter()
        .filter(|e| e.assignment.launch_number == launch.launch_number)
        .cloned()
        .collect();

    let mut details: Vec<AssignmentDetail> = own
        .iter()
        .map(|events| AssignmentDetail {
            assignment_id: events.assignment.assignment_id,
            unit_serial: events.assignment.unit_serial.clone(),
            unit: units
                .get(events.assignment.unit_serial.as_str())
                .map(|unit| (*unit).clone()),
            latest_delivery: events.latest_delivery(),
            latest_return: events.latest_return(),
            status: classify_assignment(&events.deliveries, &events.returns),
        })
        .collect();
    details.sort_by_key(|d| d.assignment_id);

    LaunchDetail {
        launch_number: launch.launch_number,
        label: launch.launch_number.to_string(),
        description: describe(launch),
        active_units: count_active(&own),
        assignments: details,
    }
}

/// Summary cards of the launches screen.
///
/// `next_launch_number` is one past `max_launch`, or 1 when there is none.
pub fn summarize_launches(
    total_launches: u64,
    oldest_record: Option<OldestRecord>,
    assignments: &[AssignmentEvents],
    max_launch: Option<LaunchNumber>,
) -> LaunchSummary {
    LaunchSummary {
        total_launches,
        oldest_record,
        active_units: count_active(assignments),
        next_launch_number: max_launch
            .map(|n| n.next())
            .unwrap_or(LaunchNumber(1)),
        degraded: Vec::new(),
    }
}
