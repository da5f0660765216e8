//! UpdateAdHandler - admins edit an ad.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::ensure_admin;
use crate::domain::ads::{Ad, AdDraft};
use crate::domain::content::ContentError;
use crate::domain::foundation::{Actor, AdId, Clock};
use crate::ports::AdRepository;

#[derive(Debug, Clone)]
pub struct UpdateAdCommand {
    pub actor: Actor,
    pub ad_id: AdId,
    pub draft: AdDraft,
}

pub type UpdateAdResult = Ad;

pub struct UpdateAdHandler {
    ads: Arc<dyn AdRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateAdHandler {
    pub fn new(ads: Arc<dyn AdRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { ads, clock }
    }

    pub async fn handle(&self, cmd: UpdateAdCommand) -> Result<UpdateAdResult, ContentError> {
        ensure_admin(&cmd.actor, "update ads")?;

        let mut ad = self
            .ads
            .find_by_id(&cmd.ad_id)
            .await?
            .ok_or_else(|| ContentError::not_found("ad", cmd.ad_id))?;
        ad.apply(cmd.draft, self.clock.now())?;
        self.ads.update(&ad).await?;

        info!(ad_id = %ad.id, is_active = ad.is_active, "Ad updated");
        Ok(ad)
    }
}
