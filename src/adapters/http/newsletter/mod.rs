//! HTTP adapter for newsletter sign-up.
//!
//! - `POST /api/newsletter` - 201 when new, 200 when already subscribed

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::newsletter_routes;
