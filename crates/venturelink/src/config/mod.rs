use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use url::Url;

use crate::workflows::matching::DEFAULT_MIN_SCORE;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub api: ApiConfig,
    pub matching: MatchingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let raw_base =
            env::var("APP_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let base_url = parse_base_url(&raw_base)?;

        let token = env::var("APP_API_TOKEN")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let timeout_secs = env::var("APP_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let min_score = match env::var("APP_MATCH_MIN_SCORE") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|score| *score <= 100)
                .ok_or(ConfigError::InvalidMinScore)?,
            Err(_) => DEFAULT_MIN_SCORE,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            api: ApiConfig {
                base_url,
                token,
                timeout: Duration::from_secs(timeout_secs),
            },
            matching: MatchingConfig { min_score },
        })
    }
}

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/";

/// Endpoint joins are relative, so the base always ends with a slash.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url =
        Url::parse(&normalized).map_err(|source| ConfigError::InvalidApiBaseUrl { source })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedApiScheme(other.to_string())),
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

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection settings for the remote platform API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            timeout: Duration::from_secs(10),
        })
    }
}

/// Ranking defaults for the match scorer.
#[derive(Debug, Clone, Copy)]
pub struct MatchingConfig {
    pub min_score: u8,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidApiBaseUrl { source: url::ParseError },
    UnsupportedApiScheme(String),
    InvalidTimeout,
    InvalidMinScore,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidApiBaseUrl { .. } => {
                write!(f, "APP_API_BASE_URL must be an absolute http(s) URL")
            }
            ConfigError::UnsupportedApiScheme(scheme) => {
                write!(f, "APP_API_BASE_URL scheme '{scheme}' is not http or https")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "APP_API_TIMEOUT_SECS must be a positive number of seconds")
            }
            ConfigError::InvalidMinScore => {
                write!(f, "APP_MATCH_MIN_SCORE must be an integer between 0 and 100")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidMinScore
            | ConfigError::UnsupportedApiScheme(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidApiBaseUrl { source } => Some(source),
        }
    }
}
