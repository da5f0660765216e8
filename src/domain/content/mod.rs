//! Content domain - posts, categories and newsletter subscribers.

mod category;
mod errors;
mod newsletter;
mod post;

pub use category::Category;
pub use errors::ContentError;
pub use newsletter::{EmailAddress, NewsletterSubscriber};
pub use post::{Post, PostDraft, PostStatus};
