//! Structured logging, request tracing and Prometheus metrics.

use thiserror::Error;

mod logging;
mod metrics;
mod request;
mod settings;

pub(crate) use metrics::metrics_handler;
pub(crate) use request::request_logging;

use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber and apply request-logging settings.
///
/// Call once, before the first request is served.
pub(crate) fn init(config: &ServerConfig) -> Result<(), ObservabilityError> {
    settings::apply(&config.observability);

    logging::install(&config.logging)
}
