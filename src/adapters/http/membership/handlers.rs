//! HTTP handlers for membership endpoints.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;

use crate::application::handlers::membership::{
    CreateBillingSessionCommand, HandleBillingWebhookCommand, ResolveMembershipQuery,
};

use super::super::error::ApiError;
use super::super::middleware::{AuthenticatedUser, OptionalUser};
use super::super::state::AppState;
use super::dto::{BillingSessionRequest, BillingSessionResponse, WebhookAck};

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// GET /api/membership
pub async fn get_membership(
    State(state): State<AppState>,
    OptionalUser(actor): OptionalUser,
) -> Result<impl IntoResponse, ApiError> {
    let query = ResolveMembershipQuery {
        user_id: actor.map(|a| a.user_id),
    };
    let info = state.resolve_membership_handler().handle(query).await?;
    Ok(Json(info))
}

/// POST /api/billing/session
pub async fn create_billing_session(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    body: Option<Json<BillingSessionRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let cmd = CreateBillingSessionCommand {
        actor,
        action: request.action,
    };
    let result = state.billing_session_handler().handle(cmd).await?;
    Ok(Json(BillingSessionResponse::from(result)))
}

/// POST /api/stripe/webhook
///
/// The body is taken as raw bytes; the signature covers them verbatim.
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandleBillingWebhookCommand {
        payload: body.to_vec(),
        signature,
    };
    let outcome = state.billing_webhook_handler().handle(cmd).await?;
    debug!(?outcome, "Webhook handled");

    Ok(Json(WebhookAck::received()))
}
