//! In-memory adapters.
//!
//! Process-local implementations of the repository ports, used by tests and
//! by local runs without a database.

mod ad_repository;
mod category_repository;
mod membership_repository;
mod newsletter_repository;
mod post_repository;

pub use ad_repository::InMemoryAdRepository;
pub use category_repository::InMemoryCategoryRepository;
pub use membership_repository::InMemoryMembershipRepository;
pub use newsletter_repository::InMemoryNewsletterRepository;
pub use post_repository::InMemoryPostRepository;
