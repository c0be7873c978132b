use alloy::primitives::Address;
use std::env;
use url::Url;

use x402::DEFAULT_FACILITATOR_URL;

const DEFAULT_PORT: u16 = 4021;
const DEFAULT_RATE_LIMIT_RPM: u64 = 60;

/// Process configuration, read once from the environment at startup.
#[derive(Clone)]
pub struct ServerConfig {
    /// Wallet address receiving payments
    pub recipient: Address,
    /// Facilitator URL for payment verification
    pub facilitator_url: String,
    /// Server port
    pub port: u16,
    /// Public base URL advertised in the discovery document
    pub base_url: String,
    /// CORS allowed origins (empty = localhost only)
    pub allowed_origins: Vec<String>,
    /// Rate limit requests per minute per IP
    pub rate_limit_rpm: u64,
    /// Bearer token required for /metrics (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("recipient", &self.recipient)
            .field("facilitator_url", &self.facilitator_url)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("allowed_origins", &self.allowed_origins)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Required: payment recipient
        let recipient_str = env::var("RECIPIENT_ADDRESS")
            .map_err(|_| ConfigError::MissingRequired("RECIPIENT_ADDRESS"))?;
        let recipient: Address = recipient_str
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(recipient_str))?;

        // Optional: facilitator URL
        let facilitator_url =
            env::var("FACILITATOR_URL").unwrap_or_else(|_| DEFAULT_FACILITATOR_URL.to_string());
        Url::parse(&facilitator_url)
            .map_err(|_| ConfigError::InvalidUrl(facilitator_url.clone()))?;

        // Optional: port
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        // Optional: public base URL for the discovery document
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

        // Optional: allowed origins
        let allowed_origins: Vec<String> = env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        // Optional: rate limit
        let rate_limit_rpm = env::var("RATE_LIMIT_RPM")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_RPM);

        // Optional: metrics token
        let metrics_token = env::var("METRICS_TOKEN").ok().filter(|s| !s.is_empty());
        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set — /metrics endpoint is publicly accessible");
        }

        Ok(Self {
            recipient,
            facilitator_url,
            port,
            base_url,
            allowed_origins,
            rate_limit_rpm,
            metrics_token,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
