//! Axum routes for the back office.

use axum::routing::{get, put};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    create_ad, create_category, create_post, dashboard_stats, delete_ad, delete_category,
    delete_post, list_ads, list_categories, list_posts, list_subscribers, update_ad,
    update_category, update_post,
};

/// Back-office routes, mounted under `/api/admin`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", put(update_post).delete(delete_post))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:id", put(update_category).delete(delete_category))
        .route("/ads", get(list_ads).post(create_ad))
        .route("/ads/:id", put(update_ad).delete(delete_ad))
        .route("/subscribers", get(list_subscribers))
        .route("/stats", get(dashboard_stats))
}
