//! HTTP adapter - axum routes, DTOs, identity extractors and error mapping.
//!
//! Each area owns `dto`, `handlers` and `routes`; [`AppState`] carries the
//! shared collaborators and builds application handlers on demand.

pub mod admin;
pub mod ads;
pub mod articles;
pub mod error;
pub mod membership;
pub mod middleware;
pub mod newsletter;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, api_routes};
pub use state::AppState;
