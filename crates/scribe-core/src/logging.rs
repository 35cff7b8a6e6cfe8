//! Logging setup built on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,scribe_text=debug,cosmic_text=warn";

/// Install a formatting subscriber that honours `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Install a formatting subscriber with an explicit filter directive,
/// e.g. `"scribe_text=trace"`.
pub fn init_with_filter(directives: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .try_init();
}
