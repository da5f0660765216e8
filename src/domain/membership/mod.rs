//! Membership domain - subscription state derived from billing events.
//!
//! - [`Membership`]: the stored record, one per user
//! - [`MembershipStatus`]: ACTIVE / PAST_DUE / CANCELLED state machine
//! - [`MembershipInfo`]: resolved premium standing, including implicit FREE
//! - [`BillingEvent`]: verified, provider-neutral lifecycle events
//! - [`WebhookSignatureVerifier`]: authenticates raw webhook payloads

mod aggregate;
mod billing_event;
mod errors;
mod info;
mod status;
mod webhook_errors;
mod webhook_verifier;

pub use aggregate::Membership;
pub use billing_event::{
    BillingEvent, BillingEventKind, CheckoutCompleted, ProviderSubscriptionStatus,
    SubscriptionUpdated,
};
pub use errors::MembershipError;
pub use info::{MembershipInfo, MembershipStanding};
pub use status::MembershipStatus;
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{
    sign_payload, SignatureHeader, WebhookSignatureVerifier, MAX_CLOCK_SKEW_SECS,
    MAX_EVENT_AGE_SECS,
};
