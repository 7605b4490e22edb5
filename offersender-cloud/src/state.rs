//! Application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::sms::strategy::{HttpTransport, StrategyChain, default_strategies};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Strategy chain for gateway delivery, built once at startup
    pub chain: Arc<StrategyChain<HttpTransport>>,
    /// reqwest client (relay pass-through reuses it)
    pub http: reqwest::Client,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// Direct gateway URL, quoted in the manual fallback instruction
    pub gateway_url: String,
    /// Gateway account username; the password arrives per request
    pub gateway_username: String,
    /// Default `Originator` for the relay endpoint
    pub originator: String,
}

impl AppState {
    /// Create a new AppState: connect, migrate, build the delivery chain.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        // No global client timeout: per-strategy timeouts are enforced by
        // the chain itself.
        let http = reqwest::Client::new();

        let strategies = default_strategies(
            &config.relay_prefix,
            &config.proxy_path,
            &config.gateway_url,
        );
        let chain = Arc::new(StrategyChain::new(
            HttpTransport::new(http.clone()),
            strategies,
            config.originator.clone(),
        ));

        Ok(Self {
            pool,
            chain,
            http,
            jwt_secret: config.jwt_secret.clone(),
            gateway_url: config.gateway_url.clone(),
            gateway_username: config.gateway_username.clone(),
            originator: config.originator.clone(),
        })
    }
}
