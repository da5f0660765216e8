//! Stripe wire types.
//!
//! Only the fields this crate reads are declared; serde ignores the rest so
//! new provider fields never break parsing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Event Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe webhook event envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeWebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    pub data: StripeEventData,

    #[serde(default)]
    pub livemode: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Object Types
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Customer ID if a customer was created or attached.
    pub customer: Option<String>,

    /// Subscription started by the session, as an id or expanded object.
    pub subscription: Option<ExpandableSubscription>,

    /// Metadata set when the session was created; carries `userId`.
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Hosted page URL. Present on create responses, absent once complete.
    pub url: Option<String>,
}

/// A subscription reference that Stripe may or may not have expanded.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ExpandableSubscription {
    Id(String),
    Object(StripeSubscription),
}

impl ExpandableSubscription {
    pub fn id(&self) -> &str {
        match self {
            ExpandableSubscription::Id(id) => id,
            ExpandableSubscription::Object(sub) => &sub.id,
        }
    }
}

/// Stripe Subscription object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeSubscription {
    /// Unique subscription identifier (sub_...).
    pub id: String,

    /// Customer ID owning this subscription.
    pub customer: String,

    /// Provider status string (active, past_due, canceled, trialing, ...).
    pub status: String,

    /// Current period end (Unix timestamp).
    pub current_period_end: Option<i64>,
}

/// Stripe Billing Portal session object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePortalSession {
    pub id: String,
    pub url: String,
}

/// Error body returned by the Stripe API.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    pub message: Option<String>,
    pub code: Option<String>,
}
