//! Browser-backed navigation
//!
//! Reads the initial location from the JavaScript host and hands outbound
//! navigation back to it. The host reports the resulting change through
//! [`NavigationManager::set_location`].

use waypoint_interop::{BrowserNavigationInterop, JsRuntime, NavigationInterop};

use crate::error::NavigationError;
use crate::manager::{InitialLocation, NavigationBackend, NavigationManager};
use crate::Result;

pub type BrowserNavigationManager<R> = NavigationManager<BrowserNavigation<R>>;

pub struct BrowserNavigation<R> {
    interop: BrowserNavigationInterop<R>,
}

impl<R: JsRuntime> BrowserNavigation<R> {
    pub fn new(runtime: R) -> Self {
        Self {
            interop: BrowserNavigationInterop::new(runtime),
        }
    }

    pub fn with_identifiers(runtime: R, identifiers: NavigationInterop) -> Self {
        Self {
            interop: BrowserNavigationInterop::with_identifiers(runtime, identifiers),
        }
    }
}

impl<R: JsRuntime> NavigationBackend for BrowserNavigation<R> {
    fn ensure_initialized(&self) -> Result<InitialLocation> {
        // Synchronous host round-trips; the host runs on this same thread.
        let base_uri = self.interop.get_base_uri()?;
        let uri = self.interop.get_location_href()?;
        Ok(InitialLocation { base_uri, uri })
    }

    fn navigate_to_core(&self, uri: Option<&str>, force_load: bool) -> Result<()> {
        let Some(uri) = uri else {
            return Err(NavigationError::MissingUri);
        };

        self.interop.navigate_to(uri, force_load)?;
        Ok(())
    }
}

impl<R: JsRuntime> BrowserNavigationManager<R> {
    pub fn browser(runtime: R) -> Self {
        NavigationManager::new(BrowserNavigation::new(runtime))
    }

    pub fn browser_with_identifiers(runtime: R, identifiers: NavigationInterop) -> Self {
        NavigationManager::new(BrowserNavigation::with_identifiers(runtime, identifiers))
    }
}
