//! Logging and tracing infrastructure for vmtdump.
//!
//! Structured logging through the tracing crate. Output goes to stderr so it
//! never interleaves with a dump written to stdout.

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Only the first call
/// installs a subscriber; later calls are ignored.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter(default_filter))
            .with(fmt_layer)
            .init();

        info!("vmtdump tracing initialized");
    });
}

/// Initialize tracing with JSON output for structured logging.
pub fn init_tracing_json(default_filter: &str) {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_current_span(true);

        tracing_subscriber::registry()
            .with(env_filter(default_filter))
            .with(fmt_layer)
            .init();

        info!("vmtdump tracing initialized (JSON mode)");
    });
}

/// Initialize tracing as described by the logging configuration.
pub fn init_from_config(config: &LoggingConfig) {
    if config.json {
        init_tracing_json(&config.default_filter);
    } else {
        init_tracing(&config.default_filter);
    }
}
