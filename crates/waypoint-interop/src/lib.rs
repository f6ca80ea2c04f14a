//! Waypoint Interop
//!
//! Invoke-by-name bridge to the JavaScript host. The host owns the real
//! browser state; Rust reaches it only through named operations such as
//! `waypoint.navigationManager.getBaseURI`.
//!
//! All calls are synchronous. The host runtime is single-threaded and
//! every `invoke` returns only after the host operation has completed.

mod error;
mod navigation;
mod runtime;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use error::InteropError;
pub use navigation::{BrowserNavigationInterop, NavigationInterop, DEFAULT_NAMESPACE};
pub use runtime::{split_identifier, JsRuntime, JsRuntimeExt};

pub type Result<T> = std::result::Result<T, InteropError>;
