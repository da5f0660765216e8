//! Newsflow server entry point.
//!
//! config -> tracing -> database -> router -> serve -> close.

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use newsflow::adapters::email_list::{EmailListConfig, HttpEmailListProvider};
use newsflow::adapters::http::{api_router, AppState};
use newsflow::adapters::postgres::{
    self, PostgresAdRepository, PostgresCategoryRepository, PostgresMembershipRepository,
    PostgresNewsletterRepository, PostgresPostRepository,
};
use newsflow::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use newsflow::config::{AppConfig, ConfigError, ServerConfig, ValidationError};
use newsflow::domain::foundation::{Clock, DomainError, SystemClock};
use newsflow::domain::paywall::PaywallPolicy;
use newsflow::ports::{EmailListProvider, PaymentError, PaymentProvider};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Infrastructure unavailable: {0}")]
    Infrastructure(#[from] DomainError),

    #[error("Billing provider setup failed: {0}")]
    Billing(#[from] PaymentError),

    #[error("Server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Tracing may not be initialised if config loading failed.
            eprintln!("newsflow: {}", e);
            error!(error = %e, "Server exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        billing = config.billing_enabled(),
        newsletter_sync = config.newsletter.is_some(),
        "Starting newsflow"
    );

    let pool = postgres::connect(&config.database).await?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool).await?;
        info!("Database migrations applied");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let payment_provider: Option<Arc<dyn PaymentProvider>> = match &config.payment {
        Some(payment) => {
            if payment.is_test_mode() {
                info!("Stripe configured in test mode");
            }
            let stripe = StripeConfig::new(
                payment.stripe_api_key.clone(),
                payment.stripe_webhook_secret.clone(),
                payment.stripe_price_id.clone(),
            )
            .with_base_url(payment.api_base_url.clone())
            .with_request_timeout(payment.request_timeout());
            let adapter: Arc<dyn PaymentProvider> =
                Arc::new(StripePaymentAdapter::new(stripe, clock.clone())?);
            Some(adapter)
        }
        None => {
            warn!("Billing not configured; checkout and webhooks will be refused");
            None
        }
    };

    let email_list: Option<Arc<dyn EmailListProvider>> = match &config.newsletter {
        Some(newsletter) => {
            let list_config =
                EmailListConfig::new(newsletter.api_url.clone(), newsletter.api_key.clone());
            let provider: Arc<dyn EmailListProvider> =
                Arc::new(HttpEmailListProvider::new(list_config)?);
            Some(provider)
        }
        None => None,
    };

    let state = AppState {
        memberships: Arc::new(PostgresMembershipRepository::new(pool.clone())),
        posts: Arc::new(PostgresPostRepository::new(pool.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
        ads: Arc::new(PostgresAdRepository::new(pool.clone())),
        subscribers: Arc::new(PostgresNewsletterRepository::new(pool.clone())),
        payment_provider,
        email_list,
        clock,
        paywall: PaywallPolicy::new(config.paywall.free_access_days),
        site_url: config.paywall.site_url.trim_end_matches('/').to_string(),
    };

    let app = api_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; production logs are JSON.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("newsflow={0},tower_http={0}", server.log_level)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
