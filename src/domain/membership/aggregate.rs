//! Membership record.
//!
//! One record per user, created by the first completed checkout and never
//! deleted afterwards; cancellation is a status.
//!
//! # Invariants
//!
//! - `user_id` is unique across records (enforced by the store)
//! - status changes from billing updates follow [`MembershipStatus`] rules
//! - `last_event_at` only moves forward

use crate::domain::foundation::{MembershipId, StateMachine, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::{MembershipError, MembershipStatus};

/// A user's paid subscription as last reported by the billing provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,

    /// User who owns this membership.
    pub user_id: UserId,

    pub status: MembershipStatus,

    /// Billing provider customer id. Subsequent events are matched on it.
    pub stripe_customer_id: Option<String>,

    pub stripe_subscription_id: Option<String>,

    /// End of the paid period. `None` means open-ended.
    pub current_period_end: Option<Timestamp>,

    /// Creation time of the newest billing event applied.
    pub last_event_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Membership {
    /// Starts a membership from a completed checkout.
    pub fn from_checkout(
        user_id: UserId,
        stripe_customer_id: Option<String>,
        stripe_subscription_id: Option<String>,
        current_period_end: Option<Timestamp>,
        event_at: Timestamp,
        now: Timestamp,
    ) -> Self {
        Self {
            id: MembershipId::new(),
            user_id,
            status: MembershipStatus::Active,
            stripe_customer_id,
            stripe_subscription_id,
            current_period_end,
            last_event_at: Some(event_at),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites billing details from a completed checkout.
    ///
    /// This is the only path out of `Cancelled`.
    pub fn apply_checkout(
        &mut self,
        stripe_customer_id: Option<String>,
        stripe_subscription_id: Option<String>,
        current_period_end: Option<Timestamp>,
        event_at: Timestamp,
        now: Timestamp,
    ) {
        self.status = MembershipStatus::Active;
        self.stripe_customer_id = stripe_customer_id;
        self.stripe_subscription_id = stripe_subscription_id;
        self.current_period_end = current_period_end;
        self.touch(event_at, now);
    }

    /// Applies a provider status change.
    ///
    /// The period end is only replaced when the event carries one.
    ///
    /// # Errors
    ///
    /// `InvalidState` when the status machine forbids the move, which happens
    /// for any attempt to leave `Cancelled`.
    pub fn apply_status_update(
        &mut self,
        target: MembershipStatus,
        current_period_end: Option<Timestamp>,
        event_at: Timestamp,
        now: Timestamp,
    ) -> Result<(), MembershipError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| MembershipError::invalid_state(self.status.as_str(), target.as_str()))?;
        if current_period_end.is_some() {
            self.current_period_end = current_period_end;
        }
        self.touch(event_at, now);
        Ok(())
    }

    /// Marks the subscription as ended. Billing ids and period are kept.
    pub fn cancel(&mut self, event_at: Timestamp, now: Timestamp) {
        self.status = MembershipStatus::Cancelled;
        self.touch(event_at, now);
    }

    /// True when an event created at `event_at` predates the newest one
    /// already applied. Equal instants are not stale so replays converge.
    pub fn is_stale(&self, event_at: &Timestamp) -> bool {
        self.last_event_at
            .map_or(false, |last| event_at.is_before(&last))
    }

    /// Active status and an unexpired (or open) period are both required.
    pub fn is_premium_at(&self, now: &Timestamp) -> bool {
        self.status == MembershipStatus::Active
            && self
                .current_period_end
                .map_or(true, |end| end.is_after(now))
    }

    fn touch(&mut self, event_at: Timestamp, now: Timestamp) {
        self.last_event_at = Some(match self.last_event_at {
            Some(last) if last.is_after(&event_at) => last,
            _ => event_at,
        });
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_717_000_000).unwrap()
    }

    fn member() -> Membership {
        Membership::from_checkout(
            UserId::new("user-1").unwrap(),
            Some("cus_1".to_string()),
            Some("sub_1".to_string()),
            Some(now().add_days(30)),
            now(),
            now(),
        )
    }

    #[test]
    fn checkout_creates_active_membership() {
        let m = member();
        assert_eq!(m.status, MembershipStatus::Active);
        assert_eq!(m.stripe_customer_id.as_deref(), Some("cus_1"));
        assert_eq!(m.last_event_at, Some(now()));
    }

    #[test]
    fn premium_requires_active_and_unexpired_period() {
        let mut m = member();
        assert!(m.is_premium_at(&now()));

        m.current_period_end = Some(now().minus_days(1));
        assert!(!m.is_premium_at(&now()));

        m.current_period_end = None;
        assert!(m.is_premium_at(&now()));

        m.status = MembershipStatus::PastDue;
        assert!(!m.is_premium_at(&now()));
    }

    #[test]
    fn period_end_equal_to_now_is_not_premium() {
        let mut m = member();
        m.current_period_end = Some(now());
        assert!(!m.is_premium_at(&now()));
    }

    #[test]
    fn status_update_keeps_period_when_event_has_none() {
        let mut m = member();
        let before = m.current_period_end;
        m.apply_status_update(MembershipStatus::PastDue, None, now().plus_secs(5), now())
            .unwrap();
        assert_eq!(m.status, MembershipStatus::PastDue);
        assert_eq!(m.current_period_end, before);
    }

    #[test]
    fn cancelled_rejects_reactivation_by_update() {
        let mut m = member();
        m.cancel(now().plus_secs(1), now());
        let err = m
            .apply_status_update(MembershipStatus::Active, None, now().plus_secs(2), now())
            .unwrap_err();
        assert!(matches!(err, MembershipError::InvalidState { .. }));
        assert_eq!(m.status, MembershipStatus::Cancelled);
        assert_eq!(m.last_event_at, Some(now().plus_secs(1)));
    }

    #[test]
    fn checkout_reactivates_cancelled_membership() {
        let mut m = member();
        m.cancel(now().plus_secs(1), now());
        m.apply_checkout(
            Some("cus_2".to_string()),
            Some("sub_2".to_string()),
            Some(now().add_days(60)),
            now().plus_secs(10),
            now(),
        );
        assert_eq!(m.status, MembershipStatus::Active);
        assert_eq!(m.stripe_subscription_id.as_deref(), Some("sub_2"));
    }

    #[test]
    fn cancel_leaves_billing_details_untouched() {
        let mut m = member();
        let period = m.current_period_end;
        m.cancel(now().plus_secs(1), now());
        assert_eq!(m.stripe_customer_id.as_deref(), Some("cus_1"));
        assert_eq!(m.stripe_subscription_id.as_deref(), Some("sub_1"));
        assert_eq!(m.current_period_end, period);
    }

    #[test]
    fn staleness_is_strict() {
        let m = member();
        assert!(m.is_stale(&now().plus_secs(-1)));
        assert!(!m.is_stale(&now()));
        assert!(!m.is_stale(&now().plus_secs(1)));
    }
}
