//! Tracing subscriber setup.
//!
//! Logs always go to stderr so stdout stays reserved for the
//! progress report and JSON summary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::LoggingConfig;

/// Build the filter: RUST_LOG wins, then `--verbose`, then config
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { config.level.as_str() };
        EnvFilter::new(format!("pdfvec={level}"))
    })
}

/// Install the global subscriber.
///
/// Calling this twice is harmless; the second call keeps the first
/// subscriber.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    let filter = env_filter(config, verbose);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
