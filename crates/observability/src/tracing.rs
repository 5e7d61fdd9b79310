//! Tracing subscriber construction.

use tracing_subscriber::EnvFilter;

/// Resolve the filter: `RUST_LOG` if set and valid, else `fallback`, else `info`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Plain text for a terminal, one JSON object per line when `json` is set.
/// Returns quietly if a subscriber is already installed.
pub fn init_with(filter: &str, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter))
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        ::tracing::debug!("tracing already initialized: {e}");
    }
}
