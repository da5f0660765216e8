//! Advertisements and their activation window.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{AdId, Timestamp, ValidationError};

/// Display slot on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdPosition {
    TopBanner,
    Sidebar,
    Inline,
}

impl AdPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdPosition::TopBanner => "TOP_BANNER",
            AdPosition::Sidebar => "SIDEBAR",
            AdPosition::Inline => "INLINE",
        }
    }
}

impl fmt::Display for AdPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdPosition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOP_BANNER" => Ok(AdPosition::TopBanner),
            "SIDEBAR" => Ok(AdPosition::Sidebar),
            "INLINE" => Ok(AdPosition::Inline),
            other => Err(ValidationError::invalid_format(
                "position",
                format!("unknown ad position '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    pub id: AdId,
    pub title: String,
    pub image_url: Option<String>,
    pub link_url: String,
    pub position: AdPosition,
    pub active_from: Option<Timestamp>,
    pub active_to: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ad {
    pub fn create(draft: AdDraft, now: Timestamp) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id: AdId::new(),
            title: draft.title.trim().to_string(),
            image_url: draft.image_url.filter(|u| !u.trim().is_empty()),
            link_url: draft.link_url.trim().to_string(),
            position: draft.position,
            active_from: draft.active_from,
            active_to: draft.active_to,
            is_active: draft.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces editable fields; an omitted `is_active` keeps the current flag.
    pub fn apply(&mut self, draft: AdDraft, now: Timestamp) -> Result<(), ValidationError> {
        draft.validate()?;
        self.title = draft.title.trim().to_string();
        self.image_url = draft.image_url.filter(|u| !u.trim().is_empty());
        self.link_url = draft.link_url.trim().to_string();
        self.position = draft.position;
        self.active_from = draft.active_from;
        self.active_to = draft.active_to;
        if let Some(active) = draft.is_active {
            self.is_active = active;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Switched on and inside its (inclusive, open-ended) window at `now`.
    pub fn is_eligible_at(&self, now: &Timestamp) -> bool {
        self.is_active
            && self.active_from.map_or(true, |from| !from.is_after(now))
            && self.active_to.map_or(true, |to| !to.is_before(now))
    }
}

/// Editable ad fields as submitted by an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdDraft {
    pub title: String,
    pub image_url: Option<String>,
    pub link_url: String,
    pub position: AdPosition,
    pub active_from: Option<Timestamp>,
    pub active_to: Option<Timestamp>,
    pub is_active: Option<bool>,
}

impl AdDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if self.link_url.trim().is_empty() {
            return Err(ValidationError::empty_field("link_url"));
        }
        if let (Some(from), Some(to)) = (self.active_from, self.active_to) {
            if from.is_after(&to) {
                return Err(ValidationError::invalid_format(
                    "active_to",
                    "must not be earlier than active_from",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_717_000_000).unwrap()
    }

    fn draft() -> AdDraft {
        AdDraft {
            title: "Tech Conference".to_string(),
            image_url: None,
            link_url: "https://example.com/conf".to_string(),
            position: AdPosition::Sidebar,
            active_from: None,
            active_to: None,
            is_active: None,
        }
    }

    fn ad(from: Option<Timestamp>, to: Option<Timestamp>, active: bool) -> Ad {
        let mut a = Ad::create(draft(), now()).unwrap();
        a.active_from = from;
        a.active_to = to;
        a.is_active = active;
        a
    }

    #[test]
    fn new_ads_default_to_active() {
        assert!(Ad::create(draft(), now()).unwrap().is_active);
    }

    #[test]
    fn apply_without_flag_keeps_active_state() {
        let mut a = ad(None, None, false);
        a.apply(draft(), now()).unwrap();
        assert!(!a.is_active);
    }

    #[test]
    fn link_is_required() {
        let mut d = draft();
        d.link_url = " ".to_string();
        assert_eq!(d.validate(), Err(ValidationError::empty_field("link_url")));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut d = draft();
        d.active_from = Some(now());
        d.active_to = Some(now().minus_days(1));
        assert!(d.validate().is_err());
    }

    #[test]
    fn open_window_is_always_eligible() {
        assert!(ad(None, None, true).is_eligible_at(&now()));
        assert!(ad(None, None, true).is_eligible_at(&now().add_days(10_000)));
    }

    #[test]
    fn expired_yesterday_is_not_eligible() {
        assert!(!ad(None, Some(now().minus_days(1)), true).is_eligible_at(&now()));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        assert!(ad(Some(now()), Some(now()), true).is_eligible_at(&now()));
    }

    #[test]
    fn inactive_ad_is_never_eligible() {
        assert!(!ad(None, None, false).is_eligible_at(&now()));
    }

    #[test]
    fn position_parses_wire_names() {
        assert_eq!("TOP_BANNER".parse::<AdPosition>().unwrap(), AdPosition::TopBanner);
        assert!("FOOTER".parse::<AdPosition>().is_err());
    }

    proptest! {
        #[test]
        fn eligibility_matches_window_predicate(
            from in proptest::option::of(-100i64..100),
            to in proptest::option::of(-100i64..100),
            active in any::<bool>(),
        ) {
            let a = ad(
                from.map(|d| now().add_days(d)),
                to.map(|d| now().add_days(d)),
                active,
            );
            let expected = active
                && from.map_or(true, |d| d <= 0)
                && to.map_or(true, |d| d >= 0);
            prop_assert_eq!(a.is_eligible_at(&now()), expected);
        }
    }
}
