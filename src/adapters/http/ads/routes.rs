//! Axum routes for public ad slots.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::select_ads;

pub fn ad_routes() -> Router<AppState> {
    Router::new().route("/ads", get(select_ads))
}
