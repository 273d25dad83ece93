//! Logging configuration for Süt Sihirbazı.

use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr.
///
/// The filter is taken from `RUST_LOG` when set, defaulting to `info`.
/// Request logging from the HTTP layer arrives through the same subscriber.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
