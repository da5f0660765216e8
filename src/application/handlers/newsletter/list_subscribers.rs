//! ListSubscribersHandler - the newsletter list for the back office.

use std::sync::Arc;

use crate::application::authorization::ensure_can_edit;
use crate::domain::content::{ContentError, NewsletterSubscriber};
use crate::domain::foundation::Actor;
use crate::ports::NewsletterRepository;

#[derive(Debug, Clone)]
pub struct ListSubscribersQuery {
    pub actor: Actor,
}

pub type ListSubscribersResult = Vec<NewsletterSubscriber>;

pub struct ListSubscribersHandler {
    subscribers: Arc<dyn NewsletterRepository>,
}

impl ListSubscribersHandler {
    pub fn new(subscribers: Arc<dyn NewsletterRepository>) -> Self {
        Self { subscribers }
    }

    /// Newest subscriber first.
    pub async fn handle(
        &self,
        query: ListSubscribersQuery,
    ) -> Result<ListSubscribersResult, ContentError> {
        ensure_can_edit(&query.actor, "list subscribers")?;
        Ok(self.subscribers.list_newest_first().await?)
    }
}
