//! Logging subscriber initialisation.

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::{ObservabilityError, settings};

/// Crates that are noisy at `info` and only interesting when they fail.
const QUIET_TARGETS: &[&str] = &["sqlx", "h2", "hyper"];

/// Install the global subscriber and apply request logging settings.
pub(crate) fn init(config: &ServerConfig) -> Result<(), ObservabilityError> {
    settings::apply(&config.observability);

    tracing_subscriber::registry()
        .with(format_layer(config.logging.log_format))
        .with(env_filter(&config.logging.log_level))
        .try_init()?;

    Ok(())
}

fn format_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    }
}

/// `RUST_LOG` wins when it parses; otherwise the configured level applies
/// with [`QUIET_TARGETS`] held at `warn`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_ignored| EnvFilter::new(directives(level)))
}

fn directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |acc, target| format!("{acc},{target}=warn"))
}
