//! Logging setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over
//! the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` if set, else `visitcost=<level>` plus `extra`
pub fn env_filter(config: &LoggingConfig, extra: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = format!("visitcost={}", config.level);
        if !extra.is_empty() {
            directives.push(',');
            directives.push_str(extra);
        }
        EnvFilter::new(directives)
    })
}

/// Initialize the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(config: &LoggingConfig, extra: &str) {
    let filter = env_filter(config, extra);

    let result = if config.format.eq_ignore_ascii_case("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}
