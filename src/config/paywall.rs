//! Paywall configuration

use serde::Deserialize;

use crate::domain::paywall::DEFAULT_FREE_ACCESS_DAYS;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct PaywallConfig {
    /// Days after publication during which premium posts stay readable by everyone
    #[serde(default = "default_free_access_days")]
    pub free_access_days: u32,

    /// Public site origin; checkout and portal return URLs hang off it
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

impl PaywallConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.site_url.starts_with("http://") && !self.site_url.starts_with("https://") {
            return Err(ValidationError::InvalidSiteUrl);
        }
        if self.free_access_days > 365 {
            return Err(ValidationError::FreeAccessTooLong);
        }
        Ok(())
    }
}

impl Default for PaywallConfig {
    fn default() -> Self {
        Self {
            free_access_days: default_free_access_days(),
            site_url: default_site_url(),
        }
    }
}

fn default_free_access_days() -> u32 {
    DEFAULT_FREE_ACCESS_DAYS
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}
