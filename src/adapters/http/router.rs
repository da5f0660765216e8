//! Assembles every HTTP area into one router.

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;

use super::admin::admin_routes;
use super::ads::ad_routes;
use super::articles::article_routes;
use super::error::ErrorResponse;
use super::membership::membership_routes;
use super::newsletter::newsletter_routes;
use super::state::AppState;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Every route under `/api`, without transport layers.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(membership_routes())
        .merge(article_routes())
        .merge(ad_routes())
        .merge(newsletter_routes())
        .nest("/admin", admin_routes())
}

/// The complete application: routes, state and transport layers.
pub fn api_router(state: AppState, server: &ServerConfig) -> Router {
    // Outermost first: the request id exists before tracing starts.
    let transport = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors_layer(server))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(transport)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static("x-user-id"),
            HeaderName::from_static("x-user-email"),
            HeaderName::from_static("x-user-role"),
        ]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("NOT_FOUND", "No such route")),
    )
}
