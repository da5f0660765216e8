//! Axum routes for the reading surface.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{get_article, list_articles, list_categories};

/// Public reading routes, mounted under `/api`.
pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_articles))
        .route("/articles/:slug", get(get_article))
        .route("/categories", get(list_categories))
}
