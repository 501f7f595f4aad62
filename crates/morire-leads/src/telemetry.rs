use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Filter { directive: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directive, .. } => {
                write!(f, "APP_LOG_LEVEL '{directive}' is not a valid tracing filter")
            }
            TelemetryError::Subscriber(err) => write!(f, "unable to install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// A valid `RUST_LOG` directive takes precedence over the configured level.
fn lead_filter(
    config: &TelemetryConfig,
    env_directive: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = env_directive.and_then(|directive| EnvFilter::try_new(directive).ok()) {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::Filter {
        directive: config.log_level.clone(),
        source,
    })
}

/// Install the process-wide fmt subscriber used by the server and the CLI.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = lead_filter(config, env_directive.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: level.to_string(),
        }
    }

    #[test]
    fn invalid_level_reports_directive() {
        match lead_filter(&config("morire_leads=verbose"), None) {
            Err(err @ TelemetryError::Filter { .. }) => {
                assert!(err.to_string().contains("morire_leads=verbose"));
            }
            other => panic!("expected filter error, got {other:?}"),
        }
    }

    #[test]
    fn env_directive_overrides_configured_level() {
        let filter = lead_filter(&config("morire_leads=verbose"), Some("morire_leads=debug"))
            .expect("env directive parses");
        assert!(filter.to_string().contains("morire_leads=debug"));
    }

    #[test]
    fn unparsable_env_directive_falls_back_to_config() {
        let filter = lead_filter(&config("warn"), Some("morire_leads=verbose"))
            .expect("configured level parses");
        assert!(filter.to_string().contains("warn"));
        assert!(!filter.to_string().contains("morire_leads"));
    }
}
