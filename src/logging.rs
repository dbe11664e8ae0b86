//! Logging subscriber initialisation.
//!
//! Logs go to stderr so receipts on stdout stay clean.

use std::io;

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{AppConfig, LogFormat};

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log level is not a valid filter directive.
    #[error("invalid log level: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns a [`LoggingError`] if the level is invalid or a subscriber is already installed.
pub fn init(config: &AppConfig) -> Result<(), LoggingError> {
    match config.log_format {
        LogFormat::Compact => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_writer(io::stderr),
        ),
    }
}

fn init_with_layer<L>(config: &AppConfig, fmt_layer: L) -> Result<(), LoggingError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(&config.log_level)?;

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}
