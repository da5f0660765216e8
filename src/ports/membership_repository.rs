//! Membership repository port.
//!
//! One record per user. Writes carry the membership's `last_event_at` and
//! implementations must refuse to overwrite a record whose stored
//! `last_event_at` is newer, atomically with the write itself.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::{Membership, MembershipStatus};
use async_trait::async_trait;

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find a membership by user ID. `None` for free readers.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Membership>, DomainError>;

    /// Find a membership by billing provider customer ID.
    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<Membership>, DomainError>;

    async fn count_by_status(&self, status: MembershipStatus) -> Result<u64, DomainError>;

    /// Insert, or overwrite the record with the same `user_id`.
    ///
    /// Concurrent upserts for one user must serialize on the unique key.
    /// Returns `false` when the stored record saw a newer event and was kept.
    async fn upsert_by_user_id(&self, membership: &Membership) -> Result<bool, DomainError>;

    /// Overwrite an existing record matched by `id`.
    ///
    /// Must not move a stored CANCELLED record to another status; that is
    /// reserved for `upsert_by_user_id` on checkout. Returns `false` when no
    /// record matched, the stored one is newer, or it is cancelled.
    async fn update(&self, membership: &Membership) -> Result<bool, DomainError>;
}
