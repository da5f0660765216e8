//! Premium content admission.
//!
//! Rules, first match wins:
//! 1. premium readers see everything
//! 2. free posts are open until they age out of the free window (inclusive)
//! 3. premium posts are closed to everyone else

use serde::{Deserialize, Serialize};

use crate::domain::content::Post;
use crate::domain::foundation::{is_within_free_access, Timestamp};
use crate::domain::membership::MembershipInfo;

pub const DEFAULT_FREE_ACCESS_DAYS: u32 = 7;

const ARCHIVE_MESSAGE: &str =
    "This article is part of our archive. Subscribe to Premium for full archive access.";
const PREMIUM_ONLY_MESSAGE: &str = "This is a premium article. Subscribe to access.";

/// The two facts about a post the paywall looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostAccessProfile {
    pub is_premium: bool,
    pub publish_at: Option<Timestamp>,
}

impl From<&Post> for PostAccessProfile {
    fn from(post: &Post) -> Self {
        Self {
            is_premium: post.is_premium,
            publish_at: post.publish_at,
        }
    }
}

/// Why a reader was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenialReason {
    /// Free post older than the free window.
    Archive,
    /// Premium post, reader not premium.
    PremiumOnly,
}

impl DenialReason {
    /// Reader-facing explanation.
    pub fn message(&self) -> &'static str {
        match self {
            DenialReason::Archive => ARCHIVE_MESSAGE,
            DenialReason::PremiumOnly => PREMIUM_ONLY_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub can_access: bool,
    pub reason: Option<DenialReason>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            can_access: true,
            reason: None,
        }
    }

    pub fn deny(reason: DenialReason) -> Self {
        Self {
            can_access: false,
            reason: Some(reason),
        }
    }
}

/// Paywall configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaywallPolicy {
    pub free_access_days: u32,
}

impl Default for PaywallPolicy {
    fn default() -> Self {
        Self {
            free_access_days: DEFAULT_FREE_ACCESS_DAYS,
        }
    }
}

impl PaywallPolicy {
    pub fn new(free_access_days: u32) -> Self {
        Self { free_access_days }
    }

    pub fn decide(
        &self,
        post: PostAccessProfile,
        membership: &MembershipInfo,
        now: &Timestamp,
    ) -> AccessDecision {
        if membership.is_premium {
            return AccessDecision::allow();
        }

        if !post.is_premium {
            return if is_within_free_access(post.publish_at.as_ref(), self.free_access_days, now) {
                AccessDecision::allow()
            } else {
                AccessDecision::deny(DenialReason::Archive)
            };
        }

        AccessDecision::deny(DenialReason::PremiumOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MembershipStanding;
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn premium_member() -> MembershipInfo {
        MembershipInfo {
            is_premium: true,
            status: MembershipStanding::Active,
            current_period_end: Some(at("2099-01-01T00:00:00Z")),
        }
    }

    fn profile(is_premium: bool, publish_at: Option<Timestamp>) -> PostAccessProfile {
        PostAccessProfile {
            is_premium,
            publish_at,
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Free window
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn free_post_exactly_at_window_edge_is_open() {
        let now = Timestamp::now();
        let decision = PaywallPolicy::default().decide(
            profile(false, Some(now.minus_days(7))),
            &MembershipInfo::free(),
            &now,
        );
        assert_eq!(decision, AccessDecision::allow());
    }

    #[test]
    fn free_post_one_day_past_window_is_archived() {
        let now = Timestamp::now();
        let decision = PaywallPolicy::default().decide(
            profile(false, Some(now.minus_days(8))),
            &MembershipInfo::free(),
            &now,
        );
        assert_eq!(decision, AccessDecision::deny(DenialReason::Archive));
    }

    #[test]
    fn window_length_is_configurable() {
        let now = Timestamp::now();
        let post = profile(false, Some(now.minus_days(20)));
        assert!(!PaywallPolicy::new(7)
            .decide(post, &MembershipInfo::free(), &now)
            .can_access);
        assert!(PaywallPolicy::new(30)
            .decide(post, &MembershipInfo::free(), &now)
            .can_access);
    }

    #[test]
    fn undated_free_post_is_open() {
        let now = Timestamp::now();
        assert!(PaywallPolicy::default()
            .decide(profile(false, None), &MembershipInfo::free(), &now)
            .can_access);
    }

    // ══════════════════════════════════════════════════════════════
    // Worked scenarios
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn premium_member_reads_old_premium_post() {
        let now = at("2024-06-01T00:00:00Z");
        let decision = PaywallPolicy::new(7).decide(
            profile(true, Some(at("2020-01-01T00:00:00Z"))),
            &premium_member(),
            &now,
        );
        assert!(decision.can_access);
        assert_eq!(decision.reason, None);
    }

    #[test]
    fn free_reader_is_denied_old_free_post_as_archive() {
        let now = Timestamp::now();
        let decision = PaywallPolicy::new(7).decide(
            profile(false, Some(now.minus_days(400))),
            &MembershipInfo::free(),
            &now,
        );
        assert!(!decision.can_access);
        assert_eq!(
            decision.reason.map(|r| r.message()),
            Some(ARCHIVE_MESSAGE)
        );
    }

    #[test]
    fn denial_messages_are_distinct() {
        assert_ne!(
            DenialReason::Archive.message(),
            DenialReason::PremiumOnly.message()
        );
    }

    proptest! {
        #[test]
        fn premium_post_denies_non_premium_reader(days_ago in -30i64..5000, lapsed in any::<bool>()) {
            let now = Timestamp::now();
            let reader = if lapsed {
                MembershipInfo { is_premium: false, status: MembershipStanding::PastDue, current_period_end: None }
            } else {
                MembershipInfo::free()
            };
            let decision = PaywallPolicy::default()
                .decide(profile(true, Some(now.minus_days(days_ago))), &reader, &now);
            prop_assert_eq!(decision, AccessDecision::deny(DenialReason::PremiumOnly));
        }

        #[test]
        fn premium_reader_is_always_admitted(
            is_premium in any::<bool>(),
            days_ago in proptest::option::of(-30i64..5000),
            free_days in 0u32..365,
        ) {
            let now = Timestamp::now();
            let post = profile(is_premium, days_ago.map(|d| now.minus_days(d)));
            let decision = PaywallPolicy::new(free_days).decide(post, &premium_member(), &now);
            prop_assert_eq!(decision, AccessDecision::allow());
        }

        #[test]
        fn free_post_open_iff_within_window(days_ago in 0i64..1000, free_days in 0u32..365) {
            let now = Timestamp::now();
            let decision = PaywallPolicy::new(free_days)
                .decide(profile(false, Some(now.minus_days(days_ago))), &MembershipInfo::free(), &now);
            prop_assert_eq!(decision.can_access, days_ago <= i64::from(free_days));
        }
    }
}
