//! Random choice of ads for a display slot.
//!
//! Eligibility is time-dependent, so selection always starts from the full
//! collection and filters at call time.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::foundation::Timestamp;

use super::{Ad, AdPosition};

/// Ads for `position` that may be shown at `now`, in input order.
pub fn eligible_ads(ads: Vec<Ad>, position: AdPosition, now: &Timestamp) -> Vec<Ad> {
    ads.into_iter()
        .filter(|ad| ad.position == position && ad.is_eligible_at(now))
        .collect()
}

/// Uniform choice among eligible ads.
pub fn pick_one<R: Rng + ?Sized>(
    ads: Vec<Ad>,
    position: AdPosition,
    now: &Timestamp,
    rng: &mut R,
) -> Option<Ad> {
    eligible_ads(ads, position, now).choose(rng).cloned()
}

/// Up to `count` distinct eligible ads in uniformly random order.
pub fn pick_many<R: Rng + ?Sized>(
    ads: Vec<Ad>,
    position: AdPosition,
    count: usize,
    now: &Timestamp,
    rng: &mut R,
) -> Vec<Ad> {
    let mut eligible = eligible_ads(ads, position, now);
    eligible.shuffle(rng);
    eligible.truncate(count);
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ads::AdDraft;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_717_000_000).unwrap()
    }

    fn ad(title: &str, position: AdPosition) -> Ad {
        Ad::create(
            AdDraft {
                title: title.to_string(),
                image_url: None,
                link_url: format!("https://example.com/{}", title),
                position,
                active_from: None,
                active_to: None,
                is_active: None,
            },
            now(),
        )
        .unwrap()
    }

    #[test]
    fn filters_by_position_and_window() {
        let mut expired = ad("expired", AdPosition::Sidebar);
        expired.active_to = Some(now().minus_days(1));
        let ads = vec![
            ad("a", AdPosition::Sidebar),
            ad("b", AdPosition::TopBanner),
            expired,
        ];
        let eligible = eligible_ads(ads, AdPosition::Sidebar, &now());
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].title, "a");
    }

    #[test]
    fn pick_one_with_nothing_eligible_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let ads = vec![ad("banner", AdPosition::TopBanner)];
        assert!(pick_one(ads, AdPosition::Inline, &now(), &mut rng).is_none());
    }

    #[test]
    fn pick_one_with_single_candidate_always_returns_it() {
        let mut rng = StdRng::seed_from_u64(2);
        let only = ad("only", AdPosition::Inline);
        for _ in 0..50 {
            let picked = pick_one(vec![only.clone()], AdPosition::Inline, &now(), &mut rng);
            assert_eq!(picked.as_ref().map(|a| a.id), Some(only.id));
        }
    }

    #[test]
    fn pick_one_splits_evenly_between_two_candidates() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = ad("a", AdPosition::Sidebar);
        let b = ad("b", AdPosition::Sidebar);
        let mut hits_a = 0;
        for _ in 0..1000 {
            let picked = pick_one(vec![a.clone(), b.clone()], AdPosition::Sidebar, &now(), &mut rng);
            if picked.map(|p| p.id) == Some(a.id) {
                hits_a += 1;
            }
        }
        assert!((400..=600).contains(&hits_a), "a picked {hits_a} times");
    }

    #[test]
    fn pick_many_never_repeats() {
        let mut rng = StdRng::seed_from_u64(4);
        let ads: Vec<Ad> = (0..5).map(|i| ad(&i.to_string(), AdPosition::Inline)).collect();
        for _ in 0..100 {
            let picked = pick_many(ads.clone(), AdPosition::Inline, 3, &now(), &mut rng);
            let ids: HashSet<_> = picked.iter().map(|a| a.id).collect();
            assert_eq!(picked.len(), 3);
            assert_eq!(ids.len(), 3);
        }
    }

    #[test]
    fn pick_many_returns_fewer_when_pool_is_small() {
        let mut rng = StdRng::seed_from_u64(5);
        let ads = vec![ad("a", AdPosition::Inline), ad("b", AdPosition::Inline)];
        assert_eq!(pick_many(ads, AdPosition::Inline, 10, &now(), &mut rng).len(), 2);
    }

    #[test]
    fn pick_many_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(6);
        let ads = vec![ad("a", AdPosition::Inline)];
        assert!(pick_many(ads, AdPosition::Inline, 0, &now(), &mut rng).is_empty());
    }

    #[test]
    fn pick_many_leading_slot_is_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let ads: Vec<Ad> = ["x", "y", "z"]
            .iter()
            .map(|t| ad(t, AdPosition::TopBanner))
            .collect();
        let mut firsts: HashMap<String, usize> = HashMap::new();
        for _ in 0..3000 {
            let picked = pick_many(ads.clone(), AdPosition::TopBanner, 3, &now(), &mut rng);
            *firsts.entry(picked[0].title.clone()).or_default() += 1;
        }
        for title in ["x", "y", "z"] {
            let n = firsts.get(title).copied().unwrap_or(0);
            assert!((850..=1150).contains(&n), "{title} led {n} times");
        }
    }
}
