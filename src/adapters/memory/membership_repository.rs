//! In-memory membership store.
//!
//! Keyed by user id; the write lock provides the same serialization on the
//! unique key that the database upsert does.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::MembershipRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    by_user: Arc<RwLock<HashMap<UserId, Membership>>>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record directly, bypassing the stale-event guard.
    pub async fn insert(&self, membership: Membership) {
        self.by_user
            .write()
            .await
            .insert(membership.user_id.clone(), membership);
    }

    pub async fn len(&self) -> usize {
        self.by_user.read().await.len()
    }

    pub async fn all(&self) -> Vec<Membership> {
        self.by_user.read().await.values().cloned().collect()
    }
}

fn newer_than(stored: &Membership, incoming: &Membership) -> bool {
    match (stored.last_event_at, incoming.last_event_at) {
        (Some(stored_at), Some(incoming_at)) => stored_at.is_after(&incoming_at),
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn leaves_cancelled(stored: &Membership, incoming: &Membership) -> bool {
    stored.status == MembershipStatus::Cancelled && incoming.status != MembershipStatus::Cancelled
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Membership>, DomainError> {
        Ok(self.by_user.read().await.get(user_id).cloned())
    }

    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<Membership>, DomainError> {
        Ok(self
            .by_user
            .read()
            .await
            .values()
            .find(|m| m.stripe_customer_id.as_deref() == Some(customer_id))
            .cloned())
    }

    async fn count_by_status(&self, status: MembershipStatus) -> Result<u64, DomainError> {
        Ok(self
            .by_user
            .read()
            .await
            .values()
            .filter(|m| m.status == status)
            .count() as u64)
    }

    async fn upsert_by_user_id(&self, membership: &Membership) -> Result<bool, DomainError> {
        let mut by_user = self.by_user.write().await;
        match by_user.get_mut(&membership.user_id) {
            Some(stored) if newer_than(stored, membership) => Ok(false),
            Some(stored) => {
                let id = stored.id;
                let created_at = stored.created_at;
                *stored = membership.clone();
                stored.id = id;
                stored.created_at = created_at;
                Ok(true)
            }
            None => {
                by_user.insert(membership.user_id.clone(), membership.clone());
                Ok(true)
            }
        }
    }

    async fn update(&self, membership: &Membership) -> Result<bool, DomainError> {
        let mut by_user = self.by_user.write().await;
        match by_user.values_mut().find(|m| m.id == membership.id) {
            Some(stored) if newer_than(stored, membership) => Ok(false),
            Some(stored) if leaves_cancelled(stored, membership) => Ok(false),
            Some(stored) => {
                *stored = membership.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
