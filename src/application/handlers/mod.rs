//! Application handlers.
//!
//! One command or query per file; handlers hold their collaborators as
//! `Arc<dyn Port>` and expose `pub async fn handle`.

pub mod ads;
pub mod articles;
pub mod content;
pub mod dashboard;
pub mod membership;
pub mod newsletter;
