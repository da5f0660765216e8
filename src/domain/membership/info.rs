//! Resolved membership view consumed by access decisions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{Membership, MembershipStatus};

/// Standing of a reader, including the implicit free tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStanding {
    Free,
    Active,
    PastDue,
    Cancelled,
}

impl From<MembershipStatus> for MembershipStanding {
    fn from(status: MembershipStatus) -> Self {
        match status {
            MembershipStatus::Active => MembershipStanding::Active,
            MembershipStatus::PastDue => MembershipStanding::PastDue,
            MembershipStatus::Cancelled => MembershipStanding::Cancelled,
        }
    }
}

/// What a reader is entitled to right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipInfo {
    pub is_premium: bool,
    pub status: MembershipStanding,
    pub current_period_end: Option<Timestamp>,
}

impl MembershipInfo {
    /// Anonymous readers and users without a record.
    pub fn free() -> Self {
        Self {
            is_premium: false,
            status: MembershipStanding::Free,
            current_period_end: None,
        }
    }

    pub fn resolve(membership: Option<&Membership>, now: &Timestamp) -> Self {
        match membership {
            None => Self::free(),
            Some(m) => Self {
                is_premium: m.is_premium_at(now),
                status: m.status.into(),
                current_period_end: m.current_period_end,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use proptest::prelude::*;

    fn membership(status: MembershipStatus, period_end: Option<Timestamp>) -> Membership {
        let now = Timestamp::from_unix_secs(1_700_000_000).unwrap();
        let mut m = Membership::from_checkout(
            UserId::new("u").unwrap(),
            Some("cus".to_string()),
            Some("sub".to_string()),
            period_end,
            now,
            now,
        );
        m.status = status;
        m
    }

    #[test]
    fn missing_membership_is_free() {
        let info = MembershipInfo::resolve(None, &Timestamp::now());
        assert_eq!(info, MembershipInfo::free());
        assert_eq!(serde_json::to_value(&info).unwrap()["status"], "FREE");
    }

    #[test]
    fn status_and_period_are_reported_verbatim() {
        let now = Timestamp::now();
        let end = now.add_days(3);
        let info = MembershipInfo::resolve(
            Some(&membership(MembershipStatus::PastDue, Some(end))),
            &now,
        );
        assert!(!info.is_premium);
        assert_eq!(info.status, MembershipStanding::PastDue);
        assert_eq!(info.current_period_end, Some(end));
    }

    proptest! {
        #[test]
        fn active_with_lapsed_period_is_never_premium(days_ago in 0i64..3650) {
            let now = Timestamp::now();
            let m = membership(MembershipStatus::Active, Some(now.minus_days(days_ago)));
            prop_assert!(!MembershipInfo::resolve(Some(&m), &now).is_premium);
        }

        #[test]
        fn active_without_period_end_is_always_premium(offset_days in -3650i64..3650) {
            let now = Timestamp::now().add_days(offset_days);
            let m = membership(MembershipStatus::Active, None);
            prop_assert!(MembershipInfo::resolve(Some(&m), &now).is_premium);
        }

        #[test]
        fn non_active_is_never_premium(days_ahead in 1i64..3650, cancelled in any::<bool>()) {
            let now = Timestamp::now();
            let status = if cancelled { MembershipStatus::Cancelled } else { MembershipStatus::PastDue };
            let m = membership(status, Some(now.add_days(days_ahead)));
            prop_assert!(!MembershipInfo::resolve(Some(&m), &now).is_premium);
        }
    }
}
