//! ListAdsHandler - all ads for the admin screen.

use std::sync::Arc;

use crate::application::authorization::ensure_can_edit;
use crate::domain::ads::Ad;
use crate::domain::content::ContentError;
use crate::domain::foundation::Actor;
use crate::ports::AdRepository;

#[derive(Debug, Clone)]
pub struct ListAdsQuery {
    pub actor: Actor,
}

pub type ListAdsResult = Vec<Ad>;

pub struct ListAdsHandler {
    ads: Arc<dyn AdRepository>,
}

impl ListAdsHandler {
    pub fn new(ads: Arc<dyn AdRepository>) -> Self {
        Self { ads }
    }

    pub async fn handle(&self, query: ListAdsQuery) -> Result<ListAdsResult, ContentError> {
        ensure_can_edit(&query.actor, "list ads")?;
        Ok(self.ads.list_all().await?)
    }
}
