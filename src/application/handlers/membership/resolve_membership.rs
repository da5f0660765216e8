//! ResolveMembershipHandler - Query handler for a reader's premium standing.

use std::sync::Arc;

use crate::domain::foundation::{Clock, UserId};
use crate::domain::membership::{MembershipError, MembershipInfo};
use crate::ports::MembershipRepository;

/// Query for the current standing of a reader. `None` is an anonymous reader.
#[derive(Debug, Clone)]
pub struct ResolveMembershipQuery {
    pub user_id: Option<UserId>,
}

pub type ResolveMembershipResult = MembershipInfo;

/// Read-only; storage failures are propagated, never defaulted to FREE.
pub struct ResolveMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    clock: Arc<dyn Clock>,
}

impl ResolveMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        query: ResolveMembershipQuery,
    ) -> Result<ResolveMembershipResult, MembershipError> {
        let Some(user_id) = query.user_id else {
            return Ok(MembershipInfo::free());
        };

        let membership = self.repository.find_by_user_id(&user_id).await?;
        Ok(MembershipInfo::resolve(membership.as_ref(), &self.clock.now()))
    }
}
