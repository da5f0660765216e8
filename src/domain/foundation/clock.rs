//! Wall-clock access and time-relative helpers.
//!
//! Every time-dependent rule (publication visibility, free-access window,
//! ad activation, membership period end) reads the current instant from an
//! injected [`Clock`] so decisions are reproducible in tests.

use std::sync::Mutex;

use super::Timestamp;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    instant: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn new(instant: Timestamp) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: Timestamp) {
        if let Ok(mut guard) = self.instant.lock() {
            *guard = instant;
        }
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: i64) {
        if let Ok(mut guard) = self.instant.lock() {
            *guard = guard.plus_secs(secs);
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        match self.instant.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// True while a post published at `publish_at` is still inside the free
/// window of `free_access_days` at `now`.
///
/// The boundary is inclusive: a post exactly `free_access_days` old is still
/// free. Posts without a publication date are never archived.
pub fn is_within_free_access(
    publish_at: Option<&Timestamp>,
    free_access_days: u32,
    now: &Timestamp,
) -> bool {
    match publish_at {
        None => true,
        Some(published) => now.whole_days_since(published) <= i64::from(free_access_days),
    }
}

/// Short human label for how long ago `then` was, e.g. "5m ago" or "Mar 4".
pub fn format_relative(then: &Timestamp, now: &Timestamp) -> String {
    let elapsed = now.duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    if days < 7 {
        return format!("{}d ago", days);
    }

    use chrono::Datelike;
    let then_dt = then.as_datetime();
    if then_dt.year() == now.as_datetime().year() {
        then_dt.format("%b %-d").to_string()
    } else {
        then_dt.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn fixed_clock_can_be_moved() {
        let clock = FixedClock::new(at("2024-05-01T00:00:00Z"));
        clock.advance_secs(90);
        assert_eq!(clock.now(), at("2024-05-01T00:01:30Z"));
        clock.set(at("2030-01-01T00:00:00Z"));
        assert_eq!(clock.now(), at("2030-01-01T00:00:00Z"));
    }

    #[test]
    fn free_access_includes_boundary_day() {
        let now = at("2024-05-15T09:00:00Z");
        assert!(is_within_free_access(Some(&now.minus_days(7)), 7, &now));
        assert!(!is_within_free_access(Some(&now.minus_days(8)), 7, &now));
    }

    #[test]
    fn free_access_counts_partial_eighth_day_as_seven() {
        let now = at("2024-05-15T09:00:00Z");
        let published = now.minus_days(8).plus_secs(1);
        assert!(is_within_free_access(Some(&published), 7, &now));
    }

    #[test]
    fn free_access_without_publish_date_is_open() {
        let now = at("2024-05-15T09:00:00Z");
        assert!(is_within_free_access(None, 0, &now));
    }

    #[test]
    fn free_access_with_future_publish_date_is_open() {
        let now = at("2024-05-15T09:00:00Z");
        assert!(is_within_free_access(Some(&now.add_days(3)), 0, &now));
    }

    #[test]
    fn format_relative_uses_coarsest_unit() {
        let now = at("2024-05-15T12:00:00Z");
        assert_eq!(format_relative(&now.plus_secs(-30), &now), "Just now");
        assert_eq!(format_relative(&now.plus_secs(-5 * 60), &now), "5m ago");
        assert_eq!(format_relative(&now.plus_secs(-3 * 3600), &now), "3h ago");
        assert_eq!(format_relative(&now.minus_days(2), &now), "2d ago");
    }

    #[test]
    fn format_relative_falls_back_to_calendar_date() {
        let now = at("2024-05-15T12:00:00Z");
        assert_eq!(format_relative(&at("2024-03-04T08:00:00Z"), &now), "Mar 4");
        assert_eq!(
            format_relative(&at("2023-11-20T08:00:00Z"), &now),
            "Nov 20, 2023"
        );
    }
}
