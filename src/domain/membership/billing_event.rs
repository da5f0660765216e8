//! Provider-neutral billing lifecycle events.
//!
//! The billing adapter verifies and translates the provider's webhook
//! envelope into a [`BillingEvent`]; reconciliation never sees raw payloads.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::MembershipStatus;

/// A verified event from the billing provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingEvent {
    /// Provider event id, used for log correlation.
    pub event_id: String,

    /// When the provider created the event. Drives stale-event discard.
    pub occurred_at: Timestamp,

    pub kind: BillingEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEventKind {
    CheckoutCompleted(CheckoutCompleted),
    SubscriptionUpdated(SubscriptionUpdated),
    SubscriptionDeleted { customer_id: String },
    /// Any event type this crate does not react to.
    Unknown { event_type: String },
}

impl BillingEventKind {
    pub fn name(&self) -> &str {
        match self {
            BillingEventKind::CheckoutCompleted(_) => "checkout_completed",
            BillingEventKind::SubscriptionUpdated(_) => "subscription_updated",
            BillingEventKind::SubscriptionDeleted { .. } => "subscription_deleted",
            BillingEventKind::Unknown { event_type } => event_type,
        }
    }
}

/// A checkout session finished and a subscription was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutCompleted {
    /// Local user id echoed back from checkout metadata.
    pub user_id: Option<UserId>,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub current_period_end: Option<Timestamp>,
}

/// The provider changed a subscription's status or period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionUpdated {
    pub customer_id: String,
    pub status: ProviderSubscriptionStatus,
    pub current_period_end: Option<Timestamp>,
}

/// Subscription status as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderSubscriptionStatus {
    Active,
    PastDue,
    Canceled,
    Other(String),
}

impl ProviderSubscriptionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => ProviderSubscriptionStatus::Active,
            "past_due" => ProviderSubscriptionStatus::PastDue,
            "canceled" => ProviderSubscriptionStatus::Canceled,
            other => ProviderSubscriptionStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProviderSubscriptionStatus::Active => "active",
            ProviderSubscriptionStatus::PastDue => "past_due",
            ProviderSubscriptionStatus::Canceled => "canceled",
            ProviderSubscriptionStatus::Other(raw) => raw,
        }
    }

    /// Local status for this provider status. Unrecognized values count as
    /// active (trialing, incomplete, unpaid and future additions).
    pub fn to_membership_status(&self) -> MembershipStatus {
        match self {
            ProviderSubscriptionStatus::Canceled => MembershipStatus::Cancelled,
            ProviderSubscriptionStatus::PastDue => MembershipStatus::PastDue,
            ProviderSubscriptionStatus::Active | ProviderSubscriptionStatus::Other(_) => {
                MembershipStatus::Active
            }
        }
    }
}

impl From<String> for ProviderSubscriptionStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ProviderSubscriptionStatus> for String {
    fn from(status: ProviderSubscriptionStatus) -> Self {
        status.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_statuses_map_to_local_statuses() {
        assert_eq!(
            ProviderSubscriptionStatus::parse("canceled").to_membership_status(),
            MembershipStatus::Cancelled
        );
        assert_eq!(
            ProviderSubscriptionStatus::parse("past_due").to_membership_status(),
            MembershipStatus::PastDue
        );
        assert_eq!(
            ProviderSubscriptionStatus::parse("active").to_membership_status(),
            MembershipStatus::Active
        );
    }

    #[test]
    fn unknown_provider_status_defaults_to_active() {
        for raw in ["trialing", "incomplete", "unpaid", "paused", ""] {
            assert_eq!(
                ProviderSubscriptionStatus::parse(raw).to_membership_status(),
                MembershipStatus::Active,
                "{raw:?}"
            );
        }
    }

    #[test]
    fn provider_status_deserializes_from_plain_string() {
        let status: ProviderSubscriptionStatus = serde_json::from_str("\"unpaid\"").unwrap();
        assert_eq!(status, ProviderSubscriptionStatus::Other("unpaid".to_string()));
    }
}
