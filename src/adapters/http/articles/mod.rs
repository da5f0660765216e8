//! HTTP adapter for the public reading surface.
//!
//! - `GET /api/articles` - visible posts, latest or trending
//! - `GET /api/articles/:slug` - one post with its paywall decision
//! - `GET /api/categories` - sections in display order

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::article_routes;
