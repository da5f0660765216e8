//! Response bodies for the reading surface.
//!
//! Listings never carry `external_url`; only the detail view does, and only
//! when the paywall allows it.

use serde::{Deserialize, Serialize};

use crate::application::handlers::articles::GetArticleResult;
use crate::domain::content::{Category, Post};
use crate::domain::foundation::{format_relative, truncate, CategoryId, PostId, Timestamp};
use crate::domain::membership::MembershipInfo;
use crate::domain::paywall::DenialReason;
use crate::ports::PostOrdering;

const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortParam {
    #[default]
    Latest,
    Trending,
}

impl From<SortParam> for PostOrdering {
    fn from(sort: SortParam) -> Self {
        match sort {
            SortParam::Latest => PostOrdering::Latest,
            SortParam::Trending => PostOrdering::Trending,
        }
    }
}

/// Query string of `GET /api/articles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListArticlesParams {
    pub category: Option<String>,
    #[serde(default)]
    pub sort: SortParam,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummaryResponse {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub label: Option<String>,
    pub category_id: CategoryId,
    pub is_premium: bool,
    pub is_featured: bool,
    pub publish_at: Option<Timestamp>,
    /// "3h ago", "Mar 4" and so on, relative to the request time.
    pub published: Option<String>,
    pub views: i64,
}

impl ArticleSummaryResponse {
    pub fn from_post(post: Post, now: &Timestamp) -> Self {
        Self {
            id: post.id,
            published: post.publish_at.as_ref().map(|at| format_relative(at, now)),
            summary: post.summary.as_deref().map(|s| truncate(s, EXCERPT_CHARS)),
            title: post.title,
            slug: post.slug,
            image_url: post.image_url,
            label: post.label,
            category_id: post.category_id,
            is_premium: post.is_premium,
            is_featured: post.is_featured,
            publish_at: post.publish_at,
            views: post.views,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    /// Withheld when `can_access` is false.
    pub external_url: Option<String>,
    pub image_url: Option<String>,
    pub label: Option<String>,
    pub category_id: CategoryId,
    pub is_premium: bool,
    pub is_featured: bool,
    pub publish_at: Option<Timestamp>,
    pub published: Option<String>,
    pub views: i64,
    pub can_access: bool,
    pub denial_reason: Option<DenialReason>,
    pub denial_message: Option<&'static str>,
    pub membership: MembershipInfo,
}

impl ArticleResponse {
    pub fn from_result(result: GetArticleResult, now: &Timestamp) -> Self {
        let GetArticleResult {
            post,
            access,
            membership,
        } = result;

        Self {
            id: post.id,
            published: post.publish_at.as_ref().map(|at| format_relative(at, now)),
            title: post.title,
            slug: post.slug,
            summary: post.summary,
            external_url: post.external_url,
            image_url: post.image_url,
            label: post.label,
            category_id: post.category_id,
            is_premium: post.is_premium,
            is_featured: post.is_featured,
            publish_at: post.publish_at,
            views: post.views,
            can_access: access.can_access,
            denial_reason: access.reason,
            denial_message: access.reason.map(|r| r.message()),
            membership,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            sort_order: category.sort_order,
        }
    }
}
