//! Ad handlers.
//!
//! Public slot selection plus admin management. Editors may list ads; only
//! admins change them.

mod create_ad;
mod delete_ad;
mod list_ads;
mod select_ads;
mod update_ad;

pub use create_ad::{CreateAdCommand, CreateAdHandler, CreateAdResult};
pub use delete_ad::{DeleteAdCommand, DeleteAdHandler};
pub use list_ads::{ListAdsHandler, ListAdsQuery, ListAdsResult};
pub use select_ads::{SelectAdsHandler, SelectAdsQuery, SelectAdsResult};
pub use update_ad::{UpdateAdCommand, UpdateAdHandler, UpdateAdResult};
