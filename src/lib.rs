//! Newsflow - news publishing backend with a metered paywall.
//!
//! Readers get free posts for a window after publication; older and premium
//! posts require an active membership. Memberships are reconciled from
//! billing provider webhooks, ads are drawn at random per placement slot, and
//! editors manage posts, categories and ads through JSON endpoints.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
