//! Axum routes for newsletter sign-up.

use axum::routing::post;
use axum::Router;

use super::super::state::AppState;
use super::handlers::subscribe;

pub fn newsletter_routes() -> Router<AppState> {
    Router::new().route("/newsletter", post(subscribe))
}
