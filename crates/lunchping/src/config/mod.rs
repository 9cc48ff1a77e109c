use chrono::FixedOffset;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::recommendation::PoolChangePolicy;

pub const DEFAULT_KAKAO_API_BASE: &str = "https://dapi.kakao.com/v2/local/search";

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
    pub clock: ClockConfig,
    pub places: PlacesConfig,
    pub storage: StorageConfig,
    pub recommendation: RecommendationConfig,
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

        let raw_offset = env::var("APP_UTC_OFFSET").unwrap_or_else(|_| "+09:00".to_string());
        let utc_offset = parse_utc_offset(&raw_offset)
            .ok_or_else(|| ConfigError::InvalidUtcOffset(raw_offset.clone()))?;

        let places = PlacesConfig {
            api_key: env::var("KAKAO_REST_API_KEY").unwrap_or_default(),
            base_url: env::var("KAKAO_API_BASE")
                .unwrap_or_else(|_| DEFAULT_KAKAO_API_BASE.to_string()),
            timeout: Duration::from_secs(parse_number("PLACES_TIMEOUT_SECS", 10)?),
        };

        let storage = StorageConfig {
            root: PathBuf::from(env::var("STORAGE_ROOT").unwrap_or_else(|_| "./uploads".into())),
            bucket: env::var("STORAGE_BUCKET_NAME").unwrap_or_else(|_| "lunchping".to_string()),
            public_base_url: env::var("STORAGE_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://{host}:{port}/files")),
        };

        let reset_on_change = env::var("RECOMMEND_RESET_ON_POOL_CHANGE")
            .unwrap_or_else(|_| "true".to_string());
        let pool_change_policy = match reset_on_change.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => PoolChangePolicy::ResetSeen,
            "false" | "0" | "no" => PoolChangePolicy::RetainSeen,
            _ => {
                return Err(ConfigError::InvalidFlag {
                    variable: "RECOMMEND_RESET_ON_POOL_CHANGE",
                    value: reset_on_change,
                })
            }
        };

        let recommendation = RecommendationConfig {
            flicker_count: parse_number("RECOMMEND_FLICKER_COUNT", 20)? as usize,
            flicker_interval: Duration::from_millis(parse_number(
                "RECOMMEND_FLICKER_INTERVAL_MS",
                100,
            )?),
            pool_change_policy,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            clock: ClockConfig { utc_offset },
            places,
            storage,
            recommendation,
        })
    }
}

fn parse_number(variable: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(variable) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { variable, value }),
        Err(_) => Ok(default),
    }
}

/// Parses `+09:00`, `-0530` or `Z` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.chars().next()? {
        '+' => (1, &raw[1..]),
        '-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
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

/// Civil time zone the opening-hours tables are written in.
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    pub utc_offset: FixedOffset,
}

impl ClockConfig {
    pub fn now(&self) -> chrono::NaiveDateTime {
        chrono::Utc::now().with_timezone(&self.utc_offset).naive_local()
    }
}

/// Upstream place-search credentials and endpoint.
#[derive(Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub root: PathBuf,
    pub bucket: String,
    pub public_base_url: String,
}

#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    pub flicker_count: usize,
    pub flicker_interval: Duration,
    pub pool_change_policy: PoolChangePolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidUtcOffset(String),
    InvalidNumber { variable: &'static str, value: String },
    InvalidFlag { variable: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUtcOffset(value) => {
                write!(f, "APP_UTC_OFFSET '{value}' must look like +09:00")
            }
            ConfigError::InvalidNumber { variable, value } => {
                write!(f, "{variable} must be a non-negative integer, got '{value}'")
            }
            ConfigError::InvalidFlag { variable, value } => {
                write!(f, "{variable} must be true/false, 1/0 or yes/no, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
