//! Request and response bodies for the back office.

use serde::{Deserialize, Serialize};

use crate::application::handlers::dashboard::DashboardStats;
use crate::domain::content::{Post, PostDraft, PostStatus};
use crate::domain::foundation::{CategoryId, Timestamp};

/// Body of post create and update. `slug` is only honoured on create.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub external_url: Option<String>,
    pub image_url: Option<String>,
    pub label: Option<String>,
    pub category_id: CategoryId,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub status: PostStatus,
    pub publish_at: Option<Timestamp>,
}

impl PostRequest {
    pub fn into_parts(self) -> (PostDraft, Option<String>) {
        let draft = PostDraft {
            title: self.title,
            summary: self.summary,
            external_url: self.external_url,
            image_url: self.image_url,
            label: self.label,
            category_id: self.category_id,
            is_premium: self.is_premium,
            is_featured: self.is_featured,
            status: self.status,
            publish_at: self.publish_at,
        };
        (draft, self.slug)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Body of `GET /api/admin/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatsResponse {
    pub total_posts: u64,
    pub published_today: u64,
    pub scheduled_posts: u64,
    pub total_subscribers: u64,
    pub premium_members: u64,
    pub recent_posts: Vec<Post>,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_posts: stats.total_posts,
            published_today: stats.published_today,
            scheduled_posts: stats.scheduled_posts,
            total_subscribers: stats.total_subscribers,
            premium_members: stats.premium_members,
            recent_posts: stats.recent_posts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_request_defaults_to_free_draft() {
        let req: PostRequest = serde_json::from_value(serde_json::json!({
            "title": "Harbor reopens",
            "category_id": CategoryId::new(),
        }))
        .unwrap();

        let (draft, slug) = req.into_parts();
        assert_eq!(draft.status, PostStatus::Draft);
        assert!(!draft.is_premium);
        assert!(slug.is_none());
    }

    #[test]
    fn post_request_reads_status_in_caps() {
        let req: PostRequest = serde_json::from_value(serde_json::json!({
            "title": "Harbor reopens",
            "slug": "harbor",
            "category_id": CategoryId::new(),
            "status": "SCHEDULED",
            "publish_at": "2030-01-01T00:00:00Z",
        }))
        .unwrap();

        let (draft, slug) = req.into_parts();
        assert_eq!(draft.status, PostStatus::Scheduled);
        assert!(draft.publish_at.is_some());
        assert_eq!(slug.as_deref(), Some("harbor"));
    }
}
