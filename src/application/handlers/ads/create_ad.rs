//! CreateAdHandler - admins add an ad.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::ensure_admin;
use crate::domain::ads::{Ad, AdDraft};
use crate::domain::content::ContentError;
use crate::domain::foundation::{Actor, Clock};
use crate::ports::AdRepository;

#[derive(Debug, Clone)]
pub struct CreateAdCommand {
    pub actor: Actor,
    pub draft: AdDraft,
}

pub type CreateAdResult = Ad;

pub struct CreateAdHandler {
    ads: Arc<dyn AdRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateAdHandler {
    pub fn new(ads: Arc<dyn AdRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { ads, clock }
    }

    pub async fn handle(&self, cmd: CreateAdCommand) -> Result<CreateAdResult, ContentError> {
        ensure_admin(&cmd.actor, "create ads")?;

        let ad = Ad::create(cmd.draft, self.clock.now())?;
        self.ads.create(&ad).await?;

        info!(ad_id = %ad.id, position = %ad.position, "Ad created");
        Ok(ad)
    }
}
