//! Waypoint Core
//!
//! Application context for a client-side UI runtime. One [`App`] owns the
//! navigation manager and hands out handles to it; nothing is reachable
//! through globals.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export the pieces callers reach for alongside the context
pub use waypoint_interop::{InteropError, JsRuntime, NavigationInterop};
pub use waypoint_navigation::{
    BrowserNavigation, BrowserNavigationManager, LocationChangedEvent, NavigationError,
    NavigationManager, Subscription,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A host may have installed a subscriber already; keep theirs.
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
