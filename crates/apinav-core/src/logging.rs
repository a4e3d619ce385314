#![forbid(unsafe_code)]

//! Logging helpers.
//!
//! apinav emits structured `tracing` events (`navbar.render`,
//! `navbar.toggle`, `navbar.route`, ...). Hosts normally install their own
//! subscriber; the `tracing-json` feature offers a ready-made JSON one.

pub use tracing::{debug, debug_span, error, info, trace, warn};

/// Install a global JSON subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Returns `false` when a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
