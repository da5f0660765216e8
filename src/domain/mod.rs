//! Domain layer - pure types and rules, free of I/O.

pub mod ads;
pub mod content;
pub mod foundation;
pub mod membership;
pub mod paywall;
