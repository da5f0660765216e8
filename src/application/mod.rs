//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands change state; queries only read.

pub mod authorization;
pub mod handlers;
