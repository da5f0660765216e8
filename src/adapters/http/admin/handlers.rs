//! HTTP handlers for the back office.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::ads::{
    CreateAdCommand, DeleteAdCommand, ListAdsQuery, UpdateAdCommand,
};
use crate::application::handlers::content::{
    CreateCategoryCommand, CreatePostCommand, DeleteCategoryCommand, DeletePostCommand,
    ListCategoriesQuery, ListPostsQuery, UpdateCategoryCommand, UpdatePostCommand,
};
use crate::application::handlers::dashboard::GetDashboardStatsQuery;
use crate::application::handlers::newsletter::ListSubscribersQuery;
use crate::domain::content::ContentError;
use crate::domain::foundation::{AdId, CategoryId, PostId};

use super::super::ads::dto::{AdRequest, AdResponse};
use super::super::articles::dto::CategoryResponse;
use super::super::error::ApiError;
use super::super::middleware::AuthenticatedUser;
use super::super::state::AppState;
use super::dto::{CategoryRequest, DashboardStatsResponse, PostRequest};

/// Unparseable ids cannot name anything, so they are reported as missing.
fn parse_id<T: FromStr>(entity: &'static str, raw: &str) -> Result<T, ContentError> {
    raw.parse().map_err(|_| ContentError::not_found(entity, raw))
}

// ════════════════════════════════════════════════════════════════════════════════
// Posts
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/posts
pub async fn list_posts(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state
        .list_posts_handler()
        .handle(ListPostsQuery { actor })
        .await?;
    Ok(Json(posts))
}

/// POST /api/admin/posts
pub async fn create_post(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(request): Json<PostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (draft, slug) = request.into_parts();
    let post = state
        .create_post_handler()
        .handle(CreatePostCommand { actor, draft, slug })
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/admin/posts/:id
pub async fn update_post(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<PostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id: PostId = parse_id("post", &id)?;
    let (draft, _) = request.into_parts();
    let post = state
        .update_post_handler()
        .handle(UpdatePostCommand {
            actor,
            post_id,
            draft,
        })
        .await?;
    Ok(Json(post))
}

/// DELETE /api/admin/posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id: PostId = parse_id("post", &id)?;
    state
        .delete_post_handler()
        .handle(DeletePostCommand { actor, post_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Categories
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/categories
///
/// Same listing as the public route, but behind identity so the back office
/// can share one client.
pub async fn list_categories(
    State(state): State<AppState>,
    AuthenticatedUser(_actor): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state
        .list_categories_handler()
        .handle(ListCategoriesQuery)
        .await?;
    let body: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// POST /api/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(request): Json<CategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .create_category_handler()
        .handle(CreateCategoryCommand {
            actor,
            name: request.name,
            slug: request.slug,
            sort_order: request.sort_order,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// PUT /api/admin/categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<CategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category_id: CategoryId = parse_id("category", &id)?;
    let category = state
        .update_category_handler()
        .handle(UpdateCategoryCommand {
            actor,
            category_id,
            name: request.name,
            slug: request.slug,
            sort_order: request.sort_order,
        })
        .await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /api/admin/categories/:id
pub async fn delete_category(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let category_id: CategoryId = parse_id("category", &id)?;
    state
        .delete_category_handler()
        .handle(DeleteCategoryCommand { actor, category_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Ads
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/ads
pub async fn list_ads(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let ads = state.list_ads_handler().handle(ListAdsQuery { actor }).await?;
    let body: Vec<AdResponse> = ads.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// POST /api/admin/ads
pub async fn create_ad(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(request): Json<AdRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ad = state
        .create_ad_handler()
        .handle(CreateAdCommand {
            actor,
            draft: request.into(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(AdResponse::from(ad))))
}

/// PUT /api/admin/ads/:id
pub async fn update_ad(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<AdRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ad_id: AdId = parse_id("ad", &id)?;
    let ad = state
        .update_ad_handler()
        .handle(UpdateAdCommand {
            actor,
            ad_id,
            draft: request.into(),
        })
        .await?;
    Ok(Json(AdResponse::from(ad)))
}

/// DELETE /api/admin/ads/:id
pub async fn delete_ad(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let ad_id: AdId = parse_id("ad", &id)?;
    state
        .delete_ad_handler()
        .handle(DeleteAdCommand { actor, ad_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Newsletter and dashboard
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/subscribers
pub async fn list_subscribers(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let subscribers = state
        .list_subscribers_handler()
        .handle(ListSubscribersQuery { actor })
        .await?;
    Ok(Json(subscribers))
}

/// GET /api/admin/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .dashboard_stats_handler()
        .handle(GetDashboardStatsQuery { actor })
        .await?;
    Ok(Json(DashboardStatsResponse::from(stats)))
}
