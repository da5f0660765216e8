//! ReconcileBillingEventHandler - applies a verified billing event to the
//! stored membership.
//!
//! Every branch overwrites rather than accumulates, so a redelivered event
//! converges to the same stored state. Lookup misses and rejected transitions
//! are logged and acknowledged; only store failures surface as errors.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{Clock, MembershipId, Timestamp, UserId};
use crate::domain::membership::{
    BillingEvent, BillingEventKind, CheckoutCompleted, Membership, MembershipError,
    MembershipStatus, SubscriptionUpdated,
};
use crate::ports::MembershipRepository;

#[derive(Debug, Clone)]
pub struct ReconcileBillingEventCommand {
    pub event: BillingEvent,
}

/// What reconciliation did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Checkout completed; membership created or overwritten as ACTIVE.
    Activated {
        membership_id: MembershipId,
        user_id: UserId,
    },
    /// Subscription status or period changed.
    StatusChanged {
        membership_id: MembershipId,
        status: MembershipStatus,
    },
    /// Subscription deleted; membership marked CANCELLED.
    Cancelled { membership_id: MembershipId },
    /// No membership carries the event's customer id.
    NoMatchingMembership { customer_id: String },
    /// A newer event was already applied, or the stored record changed
    /// under us in a way the event may not override.
    StaleEventDiscarded,
    /// The status machine refused the change (e.g. leaving CANCELLED).
    TransitionRejected {
        current: MembershipStatus,
        attempted: MembershipStatus,
    },
    /// Unknown kind, or a checkout without the ids needed to act on it.
    Ignored,
}

pub type ReconcileBillingEventResult = ReconcileOutcome;

pub struct ReconcileBillingEventHandler {
    repository: Arc<dyn MembershipRepository>,
    clock: Arc<dyn Clock>,
}

impl ReconcileBillingEventHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: ReconcileBillingEventCommand,
    ) -> Result<ReconcileBillingEventResult, MembershipError> {
        let BillingEvent {
            event_id,
            occurred_at,
            kind,
        } = cmd.event;

        let outcome = match kind {
            BillingEventKind::CheckoutCompleted(checkout) => {
                self.checkout_completed(checkout, occurred_at).await?
            }
            BillingEventKind::SubscriptionUpdated(update) => {
                self.subscription_updated(update, occurred_at).await?
            }
            BillingEventKind::SubscriptionDeleted { customer_id } => {
                self.subscription_deleted(customer_id, occurred_at).await?
            }
            BillingEventKind::Unknown { event_type } => {
                debug!(event_id = %event_id, event_type = %event_type, "Ignoring billing event");
                ReconcileOutcome::Ignored
            }
        };

        info!(event_id = %event_id, outcome = ?outcome, "Billing event reconciled");
        Ok(outcome)
    }

    async fn checkout_completed(
        &self,
        checkout: CheckoutCompleted,
        event_at: Timestamp,
    ) -> Result<ReconcileOutcome, MembershipError> {
        let (Some(user_id), Some(subscription_id)) = (checkout.user_id, checkout.subscription_id)
        else {
            warn!("Checkout completed without user id or subscription, ignoring");
            return Ok(ReconcileOutcome::Ignored);
        };

        let now = self.clock.now();
        let membership = match self.repository.find_by_user_id(&user_id).await? {
            Some(existing) if existing.is_stale(&event_at) => {
                return Ok(self.discard(existing.id, event_at));
            }
            Some(mut existing) => {
                existing.apply_checkout(
                    checkout.customer_id,
                    Some(subscription_id),
                    checkout.current_period_end,
                    event_at,
                    now,
                );
                existing
            }
            None => Membership::from_checkout(
                user_id,
                checkout.customer_id,
                Some(subscription_id),
                checkout.current_period_end,
                event_at,
                now,
            ),
        };

        if !self.repository.upsert_by_user_id(&membership).await? {
            return Ok(self.discard(membership.id, event_at));
        }

        Ok(ReconcileOutcome::Activated {
            membership_id: membership.id,
            user_id: membership.user_id,
        })
    }

    async fn subscription_updated(
        &self,
        update: SubscriptionUpdated,
        event_at: Timestamp,
    ) -> Result<ReconcileOutcome, MembershipError> {
        let Some(mut membership) = self
            .repository
            .find_by_customer_id(&update.customer_id)
            .await?
        else {
            return Ok(no_match(update.customer_id));
        };

        if membership.is_stale(&event_at) {
            return Ok(self.discard(membership.id, event_at));
        }

        let current = membership.status;
        let target = update.status.to_membership_status();
        if let Err(err) = membership.apply_status_update(
            target,
            update.current_period_end,
            event_at,
            self.clock.now(),
        ) {
            warn!(
                membership_id = %membership.id,
                provider_status = %update.status.as_str(),
                error = %err,
                "Rejected subscription status change"
            );
            return Ok(ReconcileOutcome::TransitionRejected {
                current,
                attempted: target,
            });
        }

        // The store re-checks recency and the cancelled rule atomically; a
        // cancellation landing after our read wins.
        if !self.repository.update(&membership).await? {
            return Ok(self.not_applied(membership.id, event_at));
        }

        Ok(ReconcileOutcome::StatusChanged {
            membership_id: membership.id,
            status: membership.status,
        })
    }

    async fn subscription_deleted(
        &self,
        customer_id: String,
        event_at: Timestamp,
    ) -> Result<ReconcileOutcome, MembershipError> {
        let Some(mut membership) = self.repository.find_by_customer_id(&customer_id).await? else {
            return Ok(no_match(customer_id));
        };

        if membership.is_stale(&event_at) {
            return Ok(self.discard(membership.id, event_at));
        }

        membership.cancel(event_at, self.clock.now());
        if !self.repository.update(&membership).await? {
            return Ok(self.not_applied(membership.id, event_at));
        }

        Ok(ReconcileOutcome::Cancelled {
            membership_id: membership.id,
        })
    }

    fn discard(&self, membership_id: MembershipId, event_at: Timestamp) -> ReconcileOutcome {
        info!(
            membership_id = %membership_id,
            event_at = %event_at.as_datetime(),
            "Discarding stale billing event"
        );
        ReconcileOutcome::StaleEventDiscarded
    }

    fn not_applied(&self, membership_id: MembershipId, event_at: Timestamp) -> ReconcileOutcome {
        info!(
            membership_id = %membership_id,
            event_at = %event_at.as_datetime(),
            "Stored membership changed since read; billing event not applied"
        );
        ReconcileOutcome::StaleEventDiscarded
    }
}

fn no_match(customer_id: String) -> ReconcileOutcome {
    warn!(customer_id = %customer_id, "No membership for billing customer");
    ReconcileOutcome::NoMatchingMembership { customer_id }
}
