pub mod activity;
pub mod dashboard;
pub mod forecast;
pub mod launches;

#[cfg(test)]
mod tests {
    #[test]
    fn test_route_paths() {
        assert_eq!(
            super::dashboard::GET_DASHBOARD_STATISTICS,
            "/dashboard/statistics"
        );
        assert_eq!(super::dashboard::GET_DASHBOARD_CARDS, "/dashboard/cards");
        assert_eq!(super::forecast::GET_DELIVERY_FORECAST, "/dashboard/forecast");
        assert_eq!(super::launches::LIST_LAUNCHES, "/launches");
        assert_eq!(super::launches::GET_LAUNCH_SUMMARY, "/launches/summary");
        assert_eq!(
            super::launches::GET_LAUNCH_DETAIL,
            "/launches/{launch_number}"
        );
        assert_eq!(super::activity::GET_RECENT_ACTIVITY, "/activity");
    }
}
