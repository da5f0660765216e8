//! Membership handlers.
//!
//! ## Commands
//! - Processing billing webhooks (verify, then reconcile)
//! - Reconciling a verified billing event
//! - Creating checkout or billing portal sessions
//!
//! ## Queries
//! - Resolving a reader's premium standing

mod create_billing_session;
mod handle_billing_webhook;
mod reconcile_billing_event;
mod resolve_membership;

// Commands
pub use create_billing_session::{
    BillingSessionAction, CreateBillingSessionCommand, CreateBillingSessionHandler,
    CreateBillingSessionResult,
};
pub use handle_billing_webhook::{
    HandleBillingWebhookCommand, HandleBillingWebhookHandler, HandleBillingWebhookResult,
};
pub use reconcile_billing_event::{
    ReconcileBillingEventCommand, ReconcileBillingEventHandler, ReconcileBillingEventResult,
    ReconcileOutcome,
};

// Queries
pub use resolve_membership::{
    ResolveMembershipHandler, ResolveMembershipQuery, ResolveMembershipResult,
};
