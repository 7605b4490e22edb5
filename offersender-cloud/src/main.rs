//! offersender-cloud — multi-tenant SMS campaign service
//!
//! Long-running service that:
//! - Manages tenant businesses, customer lists and campaign records
//! - Dispatches bulk SMS through the SMSEveryone gateway with relay fallback
//! - Provides a tenant self-service API and a platform admin API (JWT)
//! - Exposes a public relay endpoint mirroring the gateway response

mod api;
mod auth;
mod config;
mod db;
mod error;
mod sms;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "offersender_cloud=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting offersender-cloud (env: {})", config.environment);

    // Initialize application state: connect, migrate, build the delivery chain
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("offersender-cloud HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
