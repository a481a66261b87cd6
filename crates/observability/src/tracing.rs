//! JSON log output filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Install a JSON subscriber writing to stderr.
///
/// `default_filter` is used when `RUST_LOG` is unset or invalid. Stdout is
/// left to the caller for command output.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
