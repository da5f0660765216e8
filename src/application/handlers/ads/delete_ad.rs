//! DeleteAdHandler - admins remove an ad.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::ensure_admin;
use crate::domain::content::ContentError;
use crate::domain::foundation::{Actor, AdId};
use crate::ports::AdRepository;

#[derive(Debug, Clone)]
pub struct DeleteAdCommand {
    pub actor: Actor,
    pub ad_id: AdId,
}

pub struct DeleteAdHandler {
    ads: Arc<dyn AdRepository>,
}

impl DeleteAdHandler {
    pub fn new(ads: Arc<dyn AdRepository>) -> Self {
        Self { ads }
    }

    pub async fn handle(&self, cmd: DeleteAdCommand) -> Result<(), ContentError> {
        ensure_admin(&cmd.actor, "delete ads")?;

        if !self.ads.delete(&cmd.ad_id).await? {
            return Err(ContentError::not_found("ad", cmd.ad_id));
        }
        info!(ad_id = %cmd.ad_id, "Ad deleted");
        Ok(())
    }
}
