//! Back-office dashboard.

mod get_dashboard_stats;

pub use get_dashboard_stats::{
    DashboardStats, GetDashboardStatsHandler, GetDashboardStatsQuery, GetDashboardStatsResult,
    RECENT_POSTS_LIMIT,
};
