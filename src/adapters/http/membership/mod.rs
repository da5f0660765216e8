//! HTTP adapter for membership and billing.
//!
//! - `GET /api/membership` - resolved premium standing (anonymous => FREE)
//! - `POST /api/billing/session` - checkout or portal URL for the caller
//! - `POST /api/stripe/webhook` - billing provider webhook (signature verified)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::membership_routes;
