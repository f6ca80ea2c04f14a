#![forbid(unsafe_code)]

//! Waypoint for the browser
//!
//! The JavaScript host loads this module, constructs a `NavigationHandle`
//! and calls `setLocation` whenever it sees a navigation event (history
//! change or intercepted link click). Outbound navigation goes back to the
//! host through the functions registered under the configured namespace.
//!
//! Only the target-independent helpers build outside `wasm32`.

mod host;

pub use host::{config_from_option, ListenerRegistry, ListenerSubscriptions};

#[cfg(target_arch = "wasm32")]
mod exports;
#[cfg(target_arch = "wasm32")]
mod runtime;

#[cfg(target_arch = "wasm32")]
pub use exports::{live_listener_count, NavigationHandle};
#[cfg(target_arch = "wasm32")]
pub use runtime::GlobalJsRuntime;
