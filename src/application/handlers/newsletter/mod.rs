//! Newsletter handlers.

mod list_subscribers;
mod subscribe;

pub use list_subscribers::{ListSubscribersHandler, ListSubscribersQuery, ListSubscribersResult};
pub use subscribe::{SubscribeCommand, SubscribeHandler, SubscribeOutcome, SubscribeResult};
