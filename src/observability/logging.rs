//! Structured logging.
//!
//! Uses `tracing` with an `EnvFilter`. `RUST_LOG` wins when set; otherwise
//! the configured level applies to this crate and to tower-http.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives for a given level.
pub fn default_directives(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    format!("climate_api={level},tower_http={level}")
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(level).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives("DEBUG"), "climate_api=debug,tower_http=debug");
    }
}
