use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("Failed to install log subscriber: {0}")]
    InstallError(String),
}

/// Build the filter: `RUST_LOG` wins, otherwise the configured directive
pub fn build_filter(default_filter: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_filter).map_err(|source| LoggingError::InvalidFilter {
        filter: default_filter.to_string(),
        source,
    })
}

/// Install the global fmt subscriber. Call once, early in `main`.
pub fn init(default_filter: &str) -> Result<(), LoggingError> {
    let filter = build_filter(default_filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::InstallError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_parsed() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(build_filter("weeknotes=debug,tower_http=info").is_ok());
        }
    }
}
