//! Service configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// OfferSender service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// SMS gateway campaign endpoint
    pub gateway_url: String,
    /// Public CORS relay prefix (prepended to the gateway URL)
    pub relay_prefix: String,
    /// Same-origin dev proxy path for the gateway
    pub proxy_path: String,
    /// Gateway account username (password is supplied per request)
    pub gateway_username: String,
    /// Sender number placed in the `Originator` field
    pub originator: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: environment.clone(),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            gateway_url: std::env::var("SMS_GATEWAY_URL")
                .unwrap_or_else(|_| "https://smseveryone.com/api/campaign".into()),
            relay_prefix: std::env::var("SMS_RELAY_PREFIX")
                .unwrap_or_else(|_| "https://cors-anywhere.herokuapp.com/".into()),
            proxy_path: std::env::var("SMS_PROXY_PATH")
                .unwrap_or_else(|_| "/sms-proxy/api/campaign".into()),
            gateway_username: std::env::var("SMS_GATEWAY_USERNAME")
                .unwrap_or_else(|_| "pingscribe".into()),
            originator: std::env::var("SMS_ORIGINATOR").unwrap_or_else(|_| "3247".into()),
        })
    }
}
