//! Bodies for ad endpoints, public and admin.

use serde::{Deserialize, Serialize};

use crate::domain::ads::{Ad, AdDraft, AdPosition};
use crate::domain::foundation::{AdId, Timestamp};

/// Query string of `GET /api/ads`.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectAdsParams {
    pub position: String,
    pub count: Option<usize>,
}

/// Public view of an ad; scheduling fields stay internal.
#[derive(Debug, Clone, Serialize)]
pub struct AdSlotResponse {
    pub id: AdId,
    pub title: String,
    pub image_url: Option<String>,
    pub link_url: String,
    pub position: AdPosition,
}

impl From<Ad> for AdSlotResponse {
    fn from(ad: Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            image_url: ad.image_url,
            link_url: ad.link_url,
            position: ad.position,
        }
    }
}

/// Body of admin create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct AdRequest {
    pub title: String,
    pub image_url: Option<String>,
    pub link_url: String,
    pub position: AdPosition,
    pub active_from: Option<Timestamp>,
    pub active_to: Option<Timestamp>,
    pub is_active: Option<bool>,
}

impl From<AdRequest> for AdDraft {
    fn from(req: AdRequest) -> Self {
        AdDraft {
            title: req.title,
            image_url: req.image_url,
            link_url: req.link_url,
            position: req.position,
            active_from: req.active_from,
            active_to: req.active_to,
            is_active: req.is_active,
        }
    }
}

/// Full admin view.
#[derive(Debug, Clone, Serialize)]
pub struct AdResponse {
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

impl From<Ad> for AdResponse {
    fn from(ad: Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            image_url: ad.image_url,
            link_url: ad.link_url,
            position: ad.position,
            active_from: ad.active_from,
            active_to: ad.active_to,
            is_active: ad.is_active,
            created_at: ad.created_at,
            updated_at: ad.updated_at,
        }
    }
}
