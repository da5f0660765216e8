//! Request extractors shared by the HTTP adapters.

pub mod auth;

pub use auth::{AuthRejection, AuthenticatedUser, OptionalUser};
