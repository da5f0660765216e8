//! HTTP adapter for the editorial back office.
//!
//! Every route requires an identified caller; the handlers enforce roles.
//!
//! - `GET|POST /api/admin/posts`, `PUT|DELETE /api/admin/posts/:id`
//! - `GET|POST /api/admin/categories`, `PUT|DELETE /api/admin/categories/:id`
//! - `GET|POST /api/admin/ads`, `PUT|DELETE /api/admin/ads/:id`
//! - `GET /api/admin/subscribers`, `GET /api/admin/stats`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::admin_routes;
