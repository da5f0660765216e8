//! Ads domain - placement slots, activation windows and random selection.

mod ad;
mod selector;

pub use ad::{Ad, AdDraft, AdPosition};
pub use selector::{eligible_ads, pick_many, pick_one};
