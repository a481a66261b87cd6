//! Process-wide tracing setup shared by the binaries.

/// Filter applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize structured logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(DEFAULT_FILTER);
}

/// Subscriber construction (filters, formatting).
pub mod tracing;
