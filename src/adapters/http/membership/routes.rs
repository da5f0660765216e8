//! Axum routes for membership endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{create_billing_session, get_membership, handle_stripe_webhook};

/// Membership routes, mounted under `/api`.
///
/// The webhook route carries no identity; it is authenticated by signature.
pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/membership", get(get_membership))
        .route("/billing/session", post(create_billing_session))
        .route("/stripe/webhook", post(handle_stripe_webhook))
}
