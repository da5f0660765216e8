//! Reader-facing article handlers.

mod get_article;
mod list_articles;

pub use get_article::{GetArticleHandler, GetArticleQuery, GetArticleResult};
pub use list_articles::{ListArticlesHandler, ListArticlesQuery, ListArticlesResult};
