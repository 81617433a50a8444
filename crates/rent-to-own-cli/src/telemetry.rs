//! stderr logging for the CLI.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directives}' (from {origin})")]
    Filter {
        directives: String,
        origin: &'static str,
        #[source]
        source: ParseError,
    },
    #[error("failed to install log subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Pick the filter directives: a non-blank `RUST_LOG` wins over the
/// `--log-level` flag. Unlike a silent fallback, a malformed `RUST_LOG` is
/// reported.
pub fn build_filter(env: Option<&str>, log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let (directives, origin) = match env.map(str::trim) {
        Some(value) if !value.is_empty() => (value, EnvFilter::DEFAULT_ENV),
        _ => (log_level, "--log-level"),
    };
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::Filter {
        directives: directives.to_string(),
        origin,
        source,
    })
}

pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}
