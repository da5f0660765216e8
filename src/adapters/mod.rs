//! Adapters - implementations of the port interfaces.
//!
//! - `postgres` - sqlx repositories and migrations
//! - `memory` - process-local repositories for tests and local runs
//! - `stripe` - billing provider over the Stripe REST API, plus a mock
//! - `email_list` - external mailing list sync
//! - `http` - axum routes exposing the application handlers

pub mod email_list;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
