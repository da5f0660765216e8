//! Shared fixtures for router-level integration tests.
//!
//! Builds the full axum application over the in-memory adapters with a
//! pinned clock, and offers small request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use newsflow::adapters::http::{api_router, AppState};
use newsflow::adapters::memory::{
    InMemoryAdRepository, InMemoryCategoryRepository, InMemoryMembershipRepository,
    InMemoryNewsletterRepository, InMemoryPostRepository,
};
use newsflow::config::ServerConfig;
use newsflow::domain::content::{Category, Post, PostDraft, PostStatus};
use newsflow::domain::foundation::{FixedClock, Timestamp, UserId};
use newsflow::domain::paywall::PaywallPolicy;
use newsflow::ports::{CategoryRepository, PaymentProvider, PostRepository};

pub const NOW: i64 = 1_720_000_000;
pub const SITE_URL: &str = "https://news.example.com";

pub fn now() -> Timestamp {
    Timestamp::from_unix_secs(NOW).unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub memberships: InMemoryMembershipRepository,
    pub posts: InMemoryPostRepository,
    pub categories: InMemoryCategoryRepository,
    pub ads: InMemoryAdRepository,
    pub subscribers: InMemoryNewsletterRepository,
    pub clock: Arc<FixedClock>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(|_| None)
    }

    /// Wires a billing provider; the closure receives the app clock.
    pub fn with_billing(
        provider: impl FnOnce(Arc<FixedClock>) -> Arc<dyn PaymentProvider>,
    ) -> Self {
        Self::build(|clock| Some(provider(clock)))
    }

    fn build(
        provider: impl FnOnce(Arc<FixedClock>) -> Option<Arc<dyn PaymentProvider>>,
    ) -> Self {
        let clock = Arc::new(FixedClock::new(now()));
        let memberships = InMemoryMembershipRepository::new();
        let posts = InMemoryPostRepository::new();
        let categories = InMemoryCategoryRepository::new();
        let ads = InMemoryAdRepository::new();
        let subscribers = InMemoryNewsletterRepository::new();

        let state = AppState {
            memberships: Arc::new(memberships.clone()),
            posts: Arc::new(posts.clone()),
            categories: Arc::new(categories.clone()),
            ads: Arc::new(ads.clone()),
            subscribers: Arc::new(subscribers.clone()),
            payment_provider: provider(clock.clone()),
            email_list: None,
            clock: clock.clone(),
            paywall: PaywallPolicy::new(7),
            site_url: SITE_URL.to_string(),
        };

        Self {
            router: api_router(state, &ServerConfig::default()),
            memberships,
            posts,
            categories,
            ads,
            subscribers,
            clock,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn seed_category(&self, name: &str) -> Category {
        let category = Category::new(name, None, 0, now()).unwrap();
        self.categories.create(&category).await.unwrap();
        category
    }

    /// Stores a published post whose publication date is `age_days` ago.
    pub async fn seed_post(
        &self,
        category: &Category,
        slug: &str,
        is_premium: bool,
        age_days: i64,
    ) -> Post {
        let draft = PostDraft {
            title: format!("Story {}", slug),
            summary: Some("A short summary".to_string()),
            external_url: Some(format!("https://wire.example.com/{}", slug)),
            image_url: None,
            label: None,
            category_id: category.id,
            is_premium,
            is_featured: false,
            status: PostStatus::Published,
            publish_at: Some(now().minus_days(age_days)),
        };
        let post = Post::create(draft, slug.to_string(), UserId::new("editor-1").unwrap(), now())
            .unwrap();
        self.posts.create(&post).await.unwrap();
        post
    }
}

/// Request builder with optional identity headers.
pub struct Call {
    builder: http::request::Builder,
}

impl Call {
    pub fn get(uri: &str) -> Self {
        Self::new("GET", uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new("POST", uri)
    }

    pub fn put(uri: &str) -> Self {
        Self::new("PUT", uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new("DELETE", uri)
    }

    fn new(method: &str, uri: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(uri),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    pub fn as_user(self, user_id: &str, role: &str) -> Self {
        self.header("X-User-Id", user_id).header("X-User-Role", role)
    }

    pub fn empty(self) -> Request<Body> {
        self.builder.body(Body::empty()).unwrap()
    }

    pub fn json(self, body: Value) -> Request<Body> {
        self.builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn raw(self, body: impl Into<String>) -> Request<Body> {
        self.builder.body(Body::from(body.into())).unwrap()
    }
}
