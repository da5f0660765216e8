//! HTTP handler for newsletter sign-up.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::newsletter::{SubscribeCommand, SubscribeOutcome};

use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{SubscribeRequest, SubscribeResponse};

/// POST /api/newsletter
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .subscribe_handler()
        .handle(SubscribeCommand {
            email: request.email,
        })
        .await?;

    let status = match outcome {
        SubscribeOutcome::Subscribed => StatusCode::CREATED,
        SubscribeOutcome::AlreadySubscribed => StatusCode::OK,
    };
    let body = SubscribeResponse {
        message: outcome.message().to_string(),
    };
    Ok((status, Json(body)))
}
