//! Process-wide tracing/logging setup shared by apiwire binaries.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with the filter taken from `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    init_with_filter(filter);
}

/// Initialize tracing with an explicit filter.
///
/// JSON lines with timestamps; targets are omitted since the workspace is
/// small enough that the message and fields identify the source.
pub fn init_with_filter(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
