//! Profiling utilities based on the `puffin` crate.
//!
//! Scopes are always compiled in and cost a single atomic load while
//! profiling is off. The HTTP server that streams data to `puffin_viewer`
//! needs the `profiling` feature.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Start collecting scopes and serve them on `0.0.0.0:8585`.
///
/// # Example
/// ```no_run
/// # #[cfg(feature = "profiling")]
/// scribe_core::profiling::init_profiling();
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling() {
    puffin::set_scopes_on(true);

    match puffin_http::Server::new("0.0.0.0:8585") {
        Ok(server) => {
            tracing::info!("Puffin profiler server started on http://0.0.0.0:8585");
            let _ = PROFILING_SERVER.set(server);
        }
        Err(e) => {
            tracing::error!("Failed to start puffin server: {}", e);
        }
    }
}

/// Turn scope collection on or off without starting a server.
pub fn set_enabled(enabled: bool) {
    puffin::set_scopes_on(enabled);
}

/// Mark the start of a new frame for profiling.
///
/// Call this once per frame in the host loop.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
