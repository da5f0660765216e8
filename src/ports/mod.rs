//! Ports - contracts between the application core and infrastructure.
//!
//! Every trait is object safe and `Send + Sync` so handlers can hold
//! `Arc<dyn Port>`.

mod ad_repository;
mod category_repository;
mod email_list_provider;
mod membership_repository;
mod newsletter_repository;
mod payment_provider;
mod post_repository;

pub use ad_repository::AdRepository;
pub use category_repository::CategoryRepository;
pub use email_list_provider::EmailListProvider;
pub use membership_repository::MembershipRepository;
pub use newsletter_repository::NewsletterRepository;
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    PortalSession,
};
pub use post_repository::{PostCounts, PostOrdering, PostRepository, PublishedPostQuery};
