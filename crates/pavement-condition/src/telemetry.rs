use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Transport crates that would otherwise flood `debug` output.
const QUIET_DIRECTIVES: &str = "hyper=warn,tower=warn";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directive}'")]
    InvalidFilter {
        directive: String,
        source: ParseError,
    },
    #[error("global subscriber already installed: {0}")]
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global fmt subscriber.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(config)?)
        .with_target(false)
        .with_ansi(config.ansi)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

/// `RUST_LOG` when set; otherwise the configured level with transport noise held at warn.
pub fn log_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = format!("{},{QUIET_DIRECTIVES}", config.log_level.trim());
    EnvFilter::try_new(&directive).map_err(|source| TelemetryError::InvalidFilter {
        directive,
        source,
    })
}
