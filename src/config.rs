//! Environment-driven configuration

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub rate_cache: RateCacheConfig,
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("APP_PORT", 3000u16).map_err(ConfigError::InvalidPort)?;
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let capacity =
            parse_var("RATE_CACHE_CAPACITY", 10_000u64).map_err(ConfigError::InvalidCacheCapacity)?;
        let ttl_secs = parse_var("RATE_CACHE_TTL_SECS", 300u64).map_err(ConfigError::InvalidCacheTtl)?;

        Ok(Self {
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            rate_cache: RateCacheConfig { capacity, ttl_secs },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| raw),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Nightly rate memoization.
#[derive(Debug, Clone)]
pub struct RateCacheConfig {
    pub capacity: u64,
    pub ttl_secs: u64,
}

impl RateCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16, got '{0}'")]
    InvalidPort(String),

    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost(#[from] std::net::AddrParseError),

    #[error("RATE_CACHE_CAPACITY must be a positive integer, got '{0}'")]
    InvalidCacheCapacity(String),

    #[error("RATE_CACHE_TTL_SECS must be a whole number of seconds, got '{0}'")]
    InvalidCacheTtl(String),
}
