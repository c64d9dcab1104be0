//! Environment-driven configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),
    #[error("invalid value for {var}: {message}")]
    InvalidVar { var: String, message: String },
}

/// Admin console configuration, read once at startup.
///
/// The console is an internal tool; it binds to localhost unless explicitly
/// told otherwise.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Public origin of the console, used to decide cookie security.
    pub base_url: String,
    pub api: BackendConfig,
}

/// Connection settings for the shop backend API.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl AdminConfig {
    /// Load configuration from the environment (and `.env` in development).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: get_parsed_env("ADMIN_HOST", IpAddr::V4(Ipv4Addr::LOCALHOST))?,
            port: get_parsed_env("ADMIN_PORT", 3001)?,
            base_url: get_env_or_default("ADMIN_BASE_URL", "http://localhost:3001"),
            api: BackendConfig {
                base_url: parse_api_url(&get_required_env("SHOP_API_URL")?)?,
                timeout_secs: get_parsed_env("SHOP_API_TIMEOUT_SECS", 10)?,
            },
        })
    }

    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public origin is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn get_required_env(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var.to_string()))
}

fn get_env_or_default(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn get_parsed_env<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var: var.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidVar {
        var: "SHOP_API_URL".to_string(),
        message: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidVar {
            var: "SHOP_API_URL".to_string(),
            message: format!("unsupported scheme: {}", url.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}
