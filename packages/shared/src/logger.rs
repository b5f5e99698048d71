//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, `bin_name` (normalized to its crate
/// target form) and the `duet_*` crates log at `default_level`, while
/// `tower_http` is kept at `info`.
///
/// Calling this more than once is harmless: later calls are ignored.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    let result = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(true)
        .try_init();

    if result.is_err() {
        tracing::debug!("Logger already initialized, skipping setup for '{}'", bin_name);
    }
}

fn default_directives(bin_name: &str, default_level: &str) -> String {
    let target = bin_name.replace('-', "_");
    format!(
        "{target}={default_level},duet_server={default_level},duet_shared={default_level},tower_http=info"
    )
}
