//! SelectAdsHandler - picks ads for a display slot.
//!
//! Ads are decoration: a store failure yields no ads instead of an error.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ads::{pick_many, pick_one, Ad, AdPosition};
use crate::domain::foundation::Clock;
use crate::ports::AdRepository;

#[derive(Debug, Clone, Copy)]
pub struct SelectAdsQuery {
    pub position: AdPosition,
    /// How many distinct ads to return at most.
    pub count: usize,
}

pub type SelectAdsResult = Vec<Ad>;

pub struct SelectAdsHandler {
    ads: Arc<dyn AdRepository>,
    clock: Arc<dyn Clock>,
}

impl SelectAdsHandler {
    pub fn new(ads: Arc<dyn AdRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { ads, clock }
    }

    /// Eligibility is evaluated on every call; nothing is cached.
    pub async fn handle(&self, query: SelectAdsQuery) -> SelectAdsResult {
        if query.count == 0 {
            return Vec::new();
        }

        let candidates = match self.ads.list_by_position(query.position).await {
            Ok(ads) => ads,
            Err(err) => {
                warn!(position = %query.position, error = %err, "Ad lookup failed, showing none");
                return Vec::new();
            }
        };

        let now = self.clock.now();
        let mut rng = rand::thread_rng();
        if query.count == 1 {
            pick_one(candidates, query.position, &now, &mut rng)
                .into_iter()
                .collect()
        } else {
            pick_many(candidates, query.position, query.count, &now, &mut rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAdRepository;
    use crate::domain::ads::AdDraft;
    use crate::domain::foundation::{FixedClock, Timestamp};
    use std::collections::HashSet;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_720_000_000).unwrap()
    }

    fn draft(title: &str, position: AdPosition, active_to: Option<Timestamp>) -> AdDraft {
        AdDraft {
            title: title.to_string(),
            image_url: None,
            link_url: format!("https://ads.example/{}", title),
            position,
            active_from: None,
            active_to,
            is_active: None,
        }
    }

    async fn setup(drafts: Vec<AdDraft>) -> (SelectAdsHandler, InMemoryAdRepository) {
        let repo = InMemoryAdRepository::new();
        for d in drafts {
            repo.create(&Ad::create(d, now()).unwrap()).await.unwrap();
        }
        let handler = SelectAdsHandler::new(Arc::new(repo.clone()), Arc::new(FixedClock::new(now())));
        (handler, repo)
    }

    #[tokio::test]
    async fn single_pick_returns_only_eligible_ad() {
        let (handler, _) = setup(vec![
            draft("live", AdPosition::Sidebar, None),
            draft("expired", AdPosition::Sidebar, Some(now().minus_days(1))),
            draft("banner", AdPosition::TopBanner, None),
        ])
        .await;

        for _ in 0..20 {
            let ads = handler
                .handle(SelectAdsQuery {
                    position: AdPosition::Sidebar,
                    count: 1,
                })
                .await;
            assert_eq!(ads.len(), 1);
            assert_eq!(ads[0].title, "live");
        }
    }

    #[tokio::test]
    async fn many_returns_distinct_ads_up_to_count() {
        let (handler, _) = setup(vec![
            draft("a", AdPosition::Inline, None),
            draft("b", AdPosition::Inline, None),
            draft("c", AdPosition::Inline, None),
        ])
        .await;

        let two = handler
            .handle(SelectAdsQuery {
                position: AdPosition::Inline,
                count: 2,
            })
            .await;
        assert_eq!(two.len(), 2);
        assert_ne!(two[0].id, two[1].id);

        let all = handler
            .handle(SelectAdsQuery {
                position: AdPosition::Inline,
                count: 10,
            })
            .await;
        let titles: HashSet<_> = all.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles.len(), 3);
    }

    #[tokio::test]
    async fn empty_slot_returns_nothing() {
        let (handler, _) = setup(vec![]).await;
        let ads = handler
            .handle(SelectAdsQuery {
                position: AdPosition::TopBanner,
                count: 1,
            })
            .await;
        assert!(ads.is_empty());
    }

    #[tokio::test]
    async fn store_failure_degrades_to_no_ads() {
        let (handler, repo) = setup(vec![draft("a", AdPosition::Sidebar, None)]).await;
        repo.set_unavailable(true);

        let ads = handler
            .handle(SelectAdsQuery {
                position: AdPosition::Sidebar,
                count: 1,
            })
            .await;
        assert!(ads.is_empty());
    }
}
