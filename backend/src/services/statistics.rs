use chrono::{DateTime, Utc};

use crate::models::inventory::{AssignmentEvents, FabricationRecord, Launch};
use crate::models::time::{date_to_instant, days_since, format_count, DateFormatter};
use crate::routes::dashboard::{
    CurrentLaunch, DashboardCards, DashboardStatistics, Gauge, MISSING_DESCRIPTION,
};
use crate::routes::launches::AssignmentStatus;

/// Gauge target of the "days since last delivery" card.
pub const DELIVERY_GAUGE_TARGET_DAYS: u64 = 60;

/// Gauge target of the "days since last fabrication" card (four years).
pub const FABRICATION_GAUGE_TARGET_DAYS: u64 = 1460;

/// The launch with the highest number, or the "none" sentinel.
pub fn current_launch(launches: &[Launch]) -> CurrentLaunch {
    launches
        .iter()
        .max_by_key(|launch| launch.launch_number)
        .map(|launch| CurrentLaunch {
            launch_number: launch.launch_number,
            description: launch
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
        })
        .unwrap_or_else(CurrentLaunch::none)
}

/// Aggregate the dashboard statistics from already fetched data.
///
/// `active_units` is left at 0; it is derived from assignment events with
/// [`count_active`] by the caller.
pub fn compute_statistics(
    launches: &[Launch],
    deliveries: &[DateTime<Utc>],
    fabrications: &[FabricationRecord],
    total_units: u64,
    now: DateTime<Utc>,
) -> DashboardStatistics {
    let last_delivery_at = deliveries.iter().copied().max();
    let last_fabricated_on = fabrications.iter().map(|f| f.fabricated_on).max();

    DashboardStatistics {
        current_launch: current_launch(launches),
        days_since_last_delivery: last_delivery_at
            .map(|at| days_since(at, now))
            .unwrap_or(0),
        days_since_last_fabrication: last_fabricated_on
            .map(|date| days_since(date_to_instant(date), now))
            .unwrap_or(0),
        total_units,
        active_units: 0,
        last_delivery_at,
        last_fabricated_on,
        degraded: Vec::new(),
    }
}

/// Lifecycle status of one assignment from its delivery and return events.
///
/// A return with no delivery on record counts as not delivered.
pub fn classify_assignment(
    deliveries: &[DateTime<Utc>],
    returns: &[DateTime<Utc>],
) -> AssignmentStatus {
    match (deliveries.is_empty(), returns.is_empty()) {
        (true, _) => AssignmentStatus::NotDelivered,
        (false, true) => AssignmentStatus::Active,
        (false, false) => AssignmentStatus::Completed,
    }
}

/// Number of assignments currently delivered and not returned.
pub fn count_active(assignments: &[AssignmentEvents]) -> u64 {
    assignments
        .iter()
        .filter(|a| classify_assignment(&a.deliveries, &a.returns) == AssignmentStatus::Active)
        .count() as u64
}

/// Progress gauge for a "days since" card.
pub fn build_gauge(days: u64, target_days: u64, overflow_label: &str) -> Gauge {
    let percent = if target_days == 0 {
        100.0
    } else {
        (days as f64 / target_days as f64 * 100.0).min(100.0)
    };
    let label = if days <= target_days {
        format!("{} of {} days", days, target_days)
    } else {
        overflow_label.to_string()
    };

    Gauge {
        days,
        target_days,
        percent,
        label,
    }
}

/// Presentation values of the four dashboard cards.
pub fn build_dashboard_cards(
    statistics: DashboardStatistics,
    formatter: &DateFormatter,
) -> DashboardCards {
    let current_launch_label = if statistics.current_launch.is_none() {
        "-".to_string()
    } else {
        statistics.current_launch.launch_number.to_string()
    };

    DashboardCards {
        current_launch_label,
        delivery_gauge: build_gauge(
            statistics.days_since_last_delivery,
            DELIVERY_GAUGE_TARGET_DAYS,
            "60+ days",
        ),
        fabrication_gauge: build_gauge(
            statistics.days_since_last_fabrication,
            FABRICATION_GAUGE_TARGET_DAYS,
            "4+ years",
        ),
        total_units_display: format_count(statistics.total_units),
        last_delivery_display: statistics
            .last_delivery_at
            .map(|at| formatter.format_datetime(at)),
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::{AssignmentId, LaunchAssignment, LaunchNumber};
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 20, 0, 0, 0).unwrap()
    }

    fn events(id: i64, deliveries: usize, returns: usize) -> AssignmentEvents {
        let t = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        AssignmentEvents {
            assignment: LaunchAssignment {
                assignment_id: AssignmentId(id),
                launch_number: LaunchNumber(1),
                unit_serial: format!("S{}", id),
            },
            deliveries: vec![t; deliveries],
            returns: vec![t; returns],
        }
    }

    #[test]
    fn test_empty_inputs_yield_sentinels() {
        let stats = compute_statistics(&[], &[], &[], 0, now());
        assert_eq!(stats.current_launch, CurrentLaunch::none());
        assert_eq!(stats.days_since_last_delivery, 0);
        assert_eq!(stats.days_since_last_fabrication, 0);
        assert_eq!(stats.total_units, 0);
        assert!(stats.last_delivery_at.is_none());
        assert!(stats.last_fabricated_on.is_none());
        assert!(!stats.is_degraded());
    }

    #[test]
    fn test_current_launch_is_highest_number() {
        let launches = vec![
            Launch::new(3, "third"),
            Launch::new(12, "twelfth"),
            Launch::new(7, "seventh"),
        ];
        let current = current_launch(&launches);
        assert_eq!(current.launch_number, LaunchNumber(12));
        assert_eq!(current.description, "twelfth");
    }

    #[test]
    fn test_current_launch_without_description() {
        let launches = vec![Launch {
            launch_number: LaunchNumber(5),
            description: None,
        }];
        assert_eq!(current_launch(&launches).description, "no description");
    }

    #[test]
    fn test_days_since_latest_delivery() {
        let t1 = Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2026, 1, 12, 6, 0, 0).unwrap();
        let stats = compute_statistics(&[], &[t2, t1], &[], 0, now());
        // 7 days 18 hours rounds up
        assert_eq!(stats.days_since_last_delivery, 8);
        assert_eq!(stats.last_delivery_at, Some(t2));
    }

    #[test]
    fn test_days_since_latest_fabrication() {
        let fabrications = vec![
            FabricationRecord {
                serial_number: "A".to_string(),
                fabricated_on: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            },
            FabricationRecord {
                serial_number: "B".to_string(),
                fabricated_on: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            },
        ];
        let stats = compute_statistics(&[], &[], &fabrications, 2, now());
        assert_eq!(stats.days_since_last_fabrication, 10);
        assert_eq!(
            stats.last_fabricated_on,
            NaiveDate::from_ymd_opt(2026, 1, 10)
        );
        assert_eq!(stats.total_units, 2);
    }

    #[test]
    fn test_classify_assignment() {
        let t = now();
        assert_eq!(classify_assignment(&[], &[]), AssignmentStatus::NotDelivered);
        assert_eq!(classify_assignment(&[t], &[]), AssignmentStatus::Active);
        assert_eq!(classify_assignment(&[t], &[t]), AssignmentStatus::Completed);
        assert_eq!(classify_assignment(&[], &[t]), AssignmentStatus::NotDelivered);
    }

    #[test]
    fn test_count_active() {
        let assignments = vec![events(1, 1, 0), events(2, 2, 0), events(3, 1, 1), events(4, 0, 0)];
        assert_eq!(count_active(&assignments), 2);
    }

    #[test]
    fn test_gauge_labels_and_percent() {
        let gauge = build_gauge(30, 60, "60+ days");
        assert_eq!(gauge.label, "30 of 60 days");
        assert!((gauge.percent - 50.0).abs() < f64::EPSILON);

        let full = build_gauge(60, 60, "60+ days");
        assert_eq!(full.label, "60 of 60 days");

        let over = build_gauge(90, 60, "60+ days");
        assert_eq!(over.label, "60+ days");
        assert!((over.percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dashboard_cards() {
        let delivered = Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap();
        let mut stats =
            compute_statistics(&[Launch::new(4, "fourth")], &[delivered], &[], 1_234, now());
        stats.active_units = 3;

        let cards = build_dashboard_cards(stats, &DateFormatter::new(0, false).unwrap());
        assert_eq!(cards.current_launch_label, "L4");
        assert_eq!(cards.delivery_gauge.label, "8 of 60 days");
        assert_eq!(cards.fabrication_gauge.label, "0 of 1460 days");
        assert_eq!(cards.total_units_display, "1.234");
        assert_eq!(cards.last_delivery_display.as_deref(), Some("12/01/2026 00:00"));
        assert_eq!(cards.statistics.active_units, 3);
    }

    #[test]
    fn test_dashboard_cards_without_launch() {
        let stats = compute_statistics(&[], &[], &[], 0, now());
        let cards = build_dashboard_cards(stats, &DateFormatter::default());
        assert_eq!(cards.current_launch_label, "-");
        assert!(cards.last_delivery_display.is_none());
    }
}
