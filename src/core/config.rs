//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::transport::HttpConfig;
use std::time::Duration;
use tracing::warn;

/// Default Firecrawl API endpoint.
pub const DEFAULT_FIRECRAWL_URL: &str = "https://api.firecrawl.dev";

/// Default bound on a single remote call, in seconds.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub transport: HttpConfig,

    /// Firecrawl remote service configuration.
    pub firecrawl: FirecrawlConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Firecrawl API credential.
///
/// `Missing` means nothing was configured. An invalid key is still
/// `Provided`; the remote service is the one to reject it.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum ApiKey {
    #[default]
    Missing,
    Provided(String),
}

impl ApiKey {
    /// Build from an optional raw value. Blank values count as missing.
    pub fn from_value(value: Option<String>) -> Self {
        match value {
            Some(key) if !key.trim().is_empty() => Self::Provided(key.trim().to_string()),
            _ => Self::Missing,
        }
    }

    /// Whether no credential was configured.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The raw key, if any.
    pub fn expose(&self) -> Option<&str> {
        match self {
            Self::Missing => None,
            Self::Provided(key) => Some(key),
        }
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("Missing"),
            Self::Provided(_) => f.write_str("Provided([REDACTED])"),
        }
    }
}

/// Configuration for the Firecrawl client.
#[derive(Debug, Clone)]
pub struct FirecrawlConfig {
    /// API key sent as a bearer token.
    pub api_key: ApiKey,

    /// Base URL of the API, without trailing slash.
    pub base_url: String,

    /// Upper bound on a single remote call.
    pub timeout_secs: u64,
}

impl FirecrawlConfig {
    /// Timeout applied to each remote call.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::Missing,
            base_url: DEFAULT_FIRECRAWL_URL.to_string(),
            timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "firecrawl-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: HttpConfig::default(),
            firecrawl: FirecrawlConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_HTTP_*`); the remote service uses `FIRECRAWL_*`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = HttpConfig::from_env();

        config.firecrawl.api_key = ApiKey::from_value(std::env::var("FIRECRAWL_API_KEY").ok());

        if let Ok(url) = std::env::var("FIRECRAWL_API_URL") {
            config.firecrawl.base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(timeout) = std::env::var("FIRECRAWL_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.firecrawl.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid FIRECRAWL_TIMEOUT_SECS={:?}, using {}s",
                    timeout, DEFAULT_REMOTE_TIMEOUT_SECS
                ),
            }
        }

        config
    }
}
