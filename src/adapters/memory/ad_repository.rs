//! In-memory ad store with an outage switch for degradation tests.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ads::{Ad, AdPosition};
use crate::domain::foundation::{AdId, DomainError, ErrorCode};
use crate::ports::AdRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAdRepository {
    ads: Arc<RwLock<HashMap<AdId, Ad>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryAdRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with a database error until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DomainError::database("ad store unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AdRepository for InMemoryAdRepository {
    async fn list_all(&self) -> Result<Vec<Ad>, DomainError> {
        self.check_available()?;
        let mut ads: Vec<Ad> = self.ads.read().await.values().cloned().collect();
        ads.sort_by_key(|a| Reverse(a.created_at));
        Ok(ads)
    }

    async fn list_by_position(&self, position: AdPosition) -> Result<Vec<Ad>, DomainError> {
        self.check_available()?;
        Ok(self
            .ads
            .read()
            .await
            .values()
            .filter(|a| a.position == position)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &AdId) -> Result<Option<Ad>, DomainError> {
        self.check_available()?;
        Ok(self.ads.read().await.get(id).cloned())
    }

    async fn create(&self, ad: &Ad) -> Result<(), DomainError> {
        self.check_available()?;
        self.ads.write().await.insert(ad.id, ad.clone());
        Ok(())
    }

    async fn update(&self, ad: &Ad) -> Result<(), DomainError> {
        self.check_available()?;
        match self.ads.write().await.get_mut(&ad.id) {
            Some(stored) => {
                *stored = ad.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AdNotFound,
                format!("Ad not found: {}", ad.id),
            )),
        }
    }

    async fn delete(&self, id: &AdId) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.ads.write().await.remove(id).is_some())
    }
}
