//! Tracing subscriber setup for the CLI

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// sqlx logs every statement at info; registrations only need its warnings
const DEPENDENCY_DIRECTIVES: &str = "sqlx=warn";

/// Install the global tracing subscriber on stderr, keeping stdout for
/// command output. `RUST_LOG` replaces the configured directives entirely.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
    }

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");

    Ok(())
}

fn default_directives(level: &str) -> String {
    format!("{},{}", level, DEPENDENCY_DIRECTIVES)
}
