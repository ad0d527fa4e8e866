use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Directives used when neither `RUST_LOG` nor the config provides usable ones.
pub const DEFAULT_DIRECTIVES: &str = "info";

/// Resolve the log filter.
/// - `RUST_LOG` wins if set and valid
/// - then the configured directives (e.g. `info,service::policy=debug`)
/// - falls back to [`DEFAULT_DIRECTIVES`] when the configured ones do not parse
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives.unwrap_or(DEFAULT_DIRECTIVES)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Human-readable compact output on stdout.
pub fn init_logging_default(directives: Option<&str>) {
    let _ = fmt()
        .with_env_filter(env_filter(directives))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// One JSON object per event on stdout; targets kept so `service::storage`
/// and `service::policy` events can be told apart.
pub fn init_logging_json(directives: Option<&str>) {
    let _ = fmt()
        .with_env_filter(env_filter(directives))
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}
