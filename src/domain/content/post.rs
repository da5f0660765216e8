//! Articles and their publication rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{CategoryId, PostId, Timestamp, UserId, ValidationError};

/// Editorial state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Scheduled => "SCHEDULED",
            PostStatus::Published => "PUBLISHED",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(PostStatus::Draft),
            "SCHEDULED" => Ok(PostStatus::Scheduled),
            "PUBLISHED" => Ok(PostStatus::Published),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown post status '{}'", other),
            )),
        }
    }
}

/// A news item. `external_url` is the full content gated by the paywall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub external_url: Option<String>,
    pub image_url: Option<String>,
    pub label: Option<String>,
    pub category_id: CategoryId,
    pub author_id: UserId,
    pub is_premium: bool,
    pub is_featured: bool,
    pub status: PostStatus,
    pub publish_at: Option<Timestamp>,
    pub views: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Post {
    pub fn create(
        draft: PostDraft,
        slug: String,
        author_id: UserId,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        let publish_at = draft.resolved_publish_at(now);
        Ok(Self {
            id: PostId::new(),
            title: draft.title.trim().to_string(),
            slug,
            summary: non_blank(draft.summary),
            external_url: non_blank(draft.external_url),
            image_url: non_blank(draft.image_url),
            label: non_blank(draft.label),
            category_id: draft.category_id,
            author_id,
            is_premium: draft.is_premium,
            is_featured: draft.is_featured,
            status: draft.status,
            publish_at,
            views: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces editable fields. Slug, author and view count are kept.
    pub fn apply(&mut self, draft: PostDraft, now: Timestamp) -> Result<(), ValidationError> {
        draft.validate()?;
        self.publish_at = draft.resolved_publish_at(now);
        self.title = draft.title.trim().to_string();
        self.summary = non_blank(draft.summary);
        self.external_url = non_blank(draft.external_url);
        self.image_url = non_blank(draft.image_url);
        self.label = non_blank(draft.label);
        self.category_id = draft.category_id;
        self.is_premium = draft.is_premium;
        self.is_featured = draft.is_featured;
        self.status = draft.status;
        self.updated_at = now;
        Ok(())
    }

    /// Published and not embargoed.
    pub fn is_publicly_visible(&self, now: &Timestamp) -> bool {
        self.status == PostStatus::Published
            && self.publish_at.map_or(true, |at| !at.is_after(now))
    }
}

/// Editable post fields as submitted by an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub summary: Option<String>,
    pub external_url: Option<String>,
    pub image_url: Option<String>,
    pub label: Option<String>,
    pub category_id: CategoryId,
    pub is_premium: bool,
    pub is_featured: bool,
    pub status: PostStatus,
    pub publish_at: Option<Timestamp>,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if self.status == PostStatus::Scheduled && self.publish_at.is_none() {
            return Err(ValidationError::invalid_format(
                "publish_at",
                "scheduled posts need a publication time",
            ));
        }
        Ok(())
    }

    /// Publishing without a date publishes now.
    pub fn resolved_publish_at(&self, now: Timestamp) -> Option<Timestamp> {
        match (self.publish_at, self.status) {
            (Some(at), _) => Some(at),
            (None, PostStatus::Published) => Some(now),
            (None, _) => None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
