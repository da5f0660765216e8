//! Request and response bodies for membership endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::membership::{
    BillingSessionAction, CreateBillingSessionResult,
};

/// Body of `POST /api/billing/session`. An empty body means checkout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingSessionRequest {
    #[serde(default)]
    pub action: BillingSessionAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillingSessionResponse {
    pub url: String,
    /// The session actually created; portal falls back to checkout.
    pub action: BillingSessionAction,
}

impl From<CreateBillingSessionResult> for BillingSessionResponse {
    fn from(result: CreateBillingSessionResult) -> Self {
        Self {
            url: result.url,
            action: result.action,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self { received: true }
    }
}
