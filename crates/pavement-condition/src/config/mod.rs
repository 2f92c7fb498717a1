use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage, used to pick logging defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the service and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Reads `.env` (when present) and then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Unset and blank
    /// variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let environment = var("APP_ENV")
            .map(|value| AppEnvironment::parse(&value))
            .unwrap_or(AppEnvironment::Development);

        let port = match var("APP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => DEFAULT_PORT,
        };
        let server = ServerConfig {
            host: var("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        };

        let ansi = match var("APP_LOG_ANSI") {
            Some(raw) => parse_flag("APP_LOG_ANSI", &raw)?,
            None => environment == AppEnvironment::Development,
        };
        let telemetry = TelemetryConfig {
            log_level: var("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            ansi,
        };

        let rating_table_path = match var("RATING_TABLE_PATH").map(PathBuf::from) {
            Some(path) if !path.is_file() => return Err(ConfigError::MissingRatingTable { path }),
            other => other,
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            scoring: ScoringConfig { rating_table_path },
        })
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
    }
}

/// HTTP listener binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Level or `EnvFilter` directive list; `RUST_LOG` takes precedence at startup.
    pub log_level: String,
    pub ansi: bool,
}

/// Scoring inputs that can be swapped without a rebuild.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    /// CSV of rating overrides layered on the standard tables.
    pub rating_table_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16, got '{value}'")]
    InvalidPort { value: String },
    #[error("APP_HOST '{host}' must be localhost or an IPv4/IPv6 address")]
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
    #[error("{key} must be a boolean flag, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
    #[error("RATING_TABLE_PATH points to {}, which is not a readable file", .path.display())]
    MissingRatingTable { path: PathBuf },
}
