//! Shared application state for every HTTP route.

use std::sync::Arc;

use crate::application::handlers::ads::{
    CreateAdHandler, DeleteAdHandler, ListAdsHandler, SelectAdsHandler, UpdateAdHandler,
};
use crate::application::handlers::articles::{GetArticleHandler, ListArticlesHandler};
use crate::application::handlers::content::{
    CreateCategoryHandler, CreatePostHandler, DeleteCategoryHandler, DeletePostHandler,
    ListCategoriesHandler, ListPostsHandler, UpdateCategoryHandler, UpdatePostHandler,
};
use crate::application::handlers::membership::{
    CreateBillingSessionHandler, HandleBillingWebhookHandler, ResolveMembershipHandler,
};
use crate::application::handlers::dashboard::GetDashboardStatsHandler;
use crate::application::handlers::newsletter::{ListSubscribersHandler, SubscribeHandler};
use crate::domain::foundation::Clock;
use crate::domain::paywall::PaywallPolicy;
use crate::ports::{
    AdRepository, CategoryRepository, EmailListProvider, MembershipRepository,
    NewsletterRepository, PaymentProvider, PostRepository,
};

/// Cloned per request; every dependency is behind an `Arc`.
///
/// Handlers are built on demand from the shared collaborators.
#[derive(Clone)]
pub struct AppState {
    pub memberships: Arc<dyn MembershipRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub ads: Arc<dyn AdRepository>,
    pub subscribers: Arc<dyn NewsletterRepository>,
    /// `None` when billing is not configured.
    pub payment_provider: Option<Arc<dyn PaymentProvider>>,
    /// `None` keeps subscribers local.
    pub email_list: Option<Arc<dyn EmailListProvider>>,
    pub clock: Arc<dyn Clock>,
    pub paywall: PaywallPolicy,
    pub site_url: String,
}

impl AppState {
    // ════════════════════════════════════════════════════════════════════════════
    // Membership
    // ════════════════════════════════════════════════════════════════════════════

    pub fn resolve_membership_handler(&self) -> ResolveMembershipHandler {
        ResolveMembershipHandler::new(self.memberships.clone(), self.clock.clone())
    }

    pub fn billing_session_handler(&self) -> CreateBillingSessionHandler {
        CreateBillingSessionHandler::new(
            self.memberships.clone(),
            self.payment_provider.clone(),
            self.site_url.clone(),
        )
    }

    pub fn billing_webhook_handler(&self) -> HandleBillingWebhookHandler {
        HandleBillingWebhookHandler::new(
            self.payment_provider.clone(),
            self.memberships.clone(),
            self.clock.clone(),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Articles
    // ════════════════════════════════════════════════════════════════════════════

    pub fn get_article_handler(&self) -> GetArticleHandler {
        GetArticleHandler::new(
            self.posts.clone(),
            self.memberships.clone(),
            self.clock.clone(),
            self.paywall,
        )
    }

    pub fn list_articles_handler(&self) -> ListArticlesHandler {
        ListArticlesHandler::new(self.posts.clone(), self.categories.clone(), self.clock.clone())
    }

    pub fn list_categories_handler(&self) -> ListCategoriesHandler {
        ListCategoriesHandler::new(self.categories.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Content administration
    // ════════════════════════════════════════════════════════════════════════════

    pub fn list_posts_handler(&self) -> ListPostsHandler {
        ListPostsHandler::new(self.posts.clone())
    }

    pub fn create_post_handler(&self) -> CreatePostHandler {
        CreatePostHandler::new(self.posts.clone(), self.categories.clone(), self.clock.clone())
    }

    pub fn update_post_handler(&self) -> UpdatePostHandler {
        UpdatePostHandler::new(self.posts.clone(), self.categories.clone(), self.clock.clone())
    }

    pub fn delete_post_handler(&self) -> DeletePostHandler {
        DeletePostHandler::new(self.posts.clone())
    }

    pub fn create_category_handler(&self) -> CreateCategoryHandler {
        CreateCategoryHandler::new(self.categories.clone(), self.clock.clone())
    }

    pub fn update_category_handler(&self) -> UpdateCategoryHandler {
        UpdateCategoryHandler::new(self.categories.clone())
    }

    pub fn delete_category_handler(&self) -> DeleteCategoryHandler {
        DeleteCategoryHandler::new(self.categories.clone(), self.posts.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Ads
    // ════════════════════════════════════════════════════════════════════════════

    pub fn select_ads_handler(&self) -> SelectAdsHandler {
        SelectAdsHandler::new(self.ads.clone(), self.clock.clone())
    }

    pub fn list_ads_handler(&self) -> ListAdsHandler {
        ListAdsHandler::new(self.ads.clone())
    }

    pub fn create_ad_handler(&self) -> CreateAdHandler {
        CreateAdHandler::new(self.ads.clone(), self.clock.clone())
    }

    pub fn update_ad_handler(&self) -> UpdateAdHandler {
        UpdateAdHandler::new(self.ads.clone(), self.clock.clone())
    }

    pub fn delete_ad_handler(&self) -> DeleteAdHandler {
        DeleteAdHandler::new(self.ads.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Newsletter
    // ════════════════════════════════════════════════════════════════════════════

    pub fn subscribe_handler(&self) -> SubscribeHandler {
        SubscribeHandler::new(
            self.subscribers.clone(),
            self.email_list.clone(),
            self.clock.clone(),
        )
    }

    pub fn list_subscribers_handler(&self) -> ListSubscribersHandler {
        ListSubscribersHandler::new(self.subscribers.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Dashboard
    // ════════════════════════════════════════════════════════════════════════════

    pub fn dashboard_stats_handler(&self) -> GetDashboardStatsHandler {
        GetDashboardStatsHandler::new(
            self.posts.clone(),
            self.subscribers.clone(),
            self.memberships.clone(),
            self.clock.clone(),
        )
    }
}
