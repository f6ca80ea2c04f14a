//! Waypoint Navigation
//!
//! Where am I, and take me there:
//! - [`NavigationManager`] holds the current and base URI, notifies
//!   subscribers when the location changes and forwards outbound navigation
//!   to a backend.
//! - [`NavigationBackend`] is the capability a backend provides: the initial
//!   location, and the act of navigating.
//! - [`BrowserNavigation`] is the backend that asks the JavaScript host.
//!
//! ```text
//! Uninitialized
//!   ↓ first access (backend.ensure_initialized)
//! Initialized
//! ```

mod browser;
mod error;
mod event;
mod manager;
mod uri;

pub use browser::{BrowserNavigation, BrowserNavigationManager};
pub use error::NavigationError;
pub use event::{LocationChangedEvent, Subscription};
pub use manager::{InitialLocation, NavigationBackend, NavigationManager};
pub use uri::{base_prefix, relative_to_base};

pub type Result<T> = std::result::Result<T, NavigationError>;
