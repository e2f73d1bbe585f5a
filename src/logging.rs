//! Logging setup for embedding applications.

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG` when set and defaults to `info`.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
