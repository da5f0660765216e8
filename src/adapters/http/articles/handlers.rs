//! HTTP handlers for the reading surface.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::articles::{GetArticleQuery, ListArticlesQuery};
use crate::application::handlers::content::ListCategoriesQuery;

use super::super::error::ApiError;
use super::super::middleware::OptionalUser;
use super::super::state::AppState;
use super::dto::{ArticleResponse, ArticleSummaryResponse, CategoryResponse, ListArticlesParams};

/// GET /api/articles?category=&sort=latest|trending&limit=
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListArticlesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListArticlesQuery {
        category_slug: params.category.filter(|c| !c.trim().is_empty()),
        ordering: params.sort.into(),
        limit: params.limit,
    };
    let posts = state.list_articles_handler().handle(query).await?;

    let now = state.clock.now();
    let body: Vec<ArticleSummaryResponse> = posts
        .into_iter()
        .map(|post| ArticleSummaryResponse::from_post(post, &now))
        .collect();
    Ok(Json(body))
}

/// GET /api/articles/:slug
pub async fn get_article(
    State(state): State<AppState>,
    OptionalUser(actor): OptionalUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetArticleQuery {
        slug,
        viewer: actor.map(|a| a.user_id),
    };
    let result = state.get_article_handler().handle(query).await?;
    Ok(Json(ArticleResponse::from_result(result, &state.clock.now())))
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state
        .list_categories_handler()
        .handle(ListCategoriesQuery)
        .await?;
    let body: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(Json(body))
}
