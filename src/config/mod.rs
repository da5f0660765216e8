//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `NEWSFLOW` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use newsflow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod newsletter;
mod payment;
mod paywall;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use newsletter::NewsletterConfig;
pub use payment::PaymentConfig;
pub use paywall::PaywallConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Free-access window and public site URL
    #[serde(default)]
    pub paywall: PaywallConfig,

    /// Billing provider (Stripe). `None` disables billing.
    #[serde(default)]
    pub payment: Option<PaymentConfig>,

    /// External mailing list. `None` keeps subscribers local.
    #[serde(default)]
    pub newsletter: Option<NewsletterConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NEWSFLOW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `NEWSFLOW__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NEWSFLOW__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NEWSFLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate every present section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.paywall.validate()?;
        if let Some(payment) = &self.payment {
            payment.validate()?;
        }
        if let Some(newsletter) = &self.newsletter {
            newsletter.validate()?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    pub fn billing_enabled(&self) -> bool {
        self.payment.is_some()
    }
}
