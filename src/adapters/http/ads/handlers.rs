//! HTTP handler for public ad selection.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::ads::SelectAdsQuery;
use crate::domain::ads::AdPosition;
use crate::domain::content::ContentError;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{AdSlotResponse, SelectAdsParams};

const MAX_COUNT: usize = 10;

/// GET /api/ads?position=TOP_BANNER&count=2
///
/// Never fails on store errors; the selection degrades to an empty list.
pub async fn select_ads(
    State(state): State<AppState>,
    Query(params): Query<SelectAdsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let position: AdPosition = params
        .position
        .trim()
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| ContentError::validation("position", "Unknown ad position"))?;

    let query = SelectAdsQuery {
        position,
        count: params.count.unwrap_or(1).min(MAX_COUNT),
    };
    let ads = state.select_ads_handler().handle(query).await;

    let body: Vec<AdSlotResponse> = ads.into_iter().map(Into::into).collect();
    Ok(Json(body))
}
