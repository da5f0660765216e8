//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe:
//! - Webhook signature verification and event translation
//! - Subscription checkout sessions
//! - Billing portal sessions
//!
//! # Configuration
//!
//! Read from `NEWSFLOW__PAYMENT__*`; billing stays disabled when the
//! section is absent.

mod mock_payment_provider;
mod stripe_adapter;
mod webhook_types;

pub use mock_payment_provider::{MethodCall, MockPaymentProvider};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
pub use webhook_types::{
    ExpandableSubscription, StripeCheckoutSession, StripeEventData, StripePortalSession,
    StripeSubscription, StripeWebhookEvent,
};
