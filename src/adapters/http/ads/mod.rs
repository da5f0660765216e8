//! HTTP adapter for public ad slots.
//!
//! - `GET /api/ads?position=&count=` - random eligible ads for a slot

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::ad_routes;
