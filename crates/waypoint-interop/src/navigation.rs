//! Navigation operations exposed by the host
//!
//! The host publishes three functions under a common namespace:
//! - `getBaseURI()` → application root URI
//! - `getLocationHref()` → current browser URL
//! - `navigateTo(uri, forceLoad)` → change location

use serde_json::json;

use crate::runtime::{JsRuntime, JsRuntimeExt};
use crate::Result;

/// Namespace the bundled host script registers its navigation functions under.
pub const DEFAULT_NAMESPACE: &str = "waypoint.navigationManager";

/// Fully qualified identifiers of the host navigation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationInterop {
    pub get_base_uri: String,
    pub get_location_href: String,
    pub navigate_to: String,
}

impl NavigationInterop {
    pub fn new(namespace: &str) -> Self {
        let namespace = namespace.trim().trim_end_matches('.');
        Self {
            get_base_uri: format!("{}.getBaseURI", namespace),
            get_location_href: format!("{}.getLocationHref", namespace),
            navigate_to: format!("{}.navigateTo", namespace),
        }
    }
}

impl Default for NavigationInterop {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

/// Typed access to the host navigation operations over a [`JsRuntime`].
pub struct BrowserNavigationInterop<R> {
    runtime: R,
    identifiers: NavigationInterop,
}

impl<R: JsRuntime> BrowserNavigationInterop<R> {
    pub fn new(runtime: R) -> Self {
        Self::with_identifiers(runtime, NavigationInterop::default())
    }

    pub fn with_identifiers(runtime: R, identifiers: NavigationInterop) -> Self {
        Self {
            runtime,
            identifiers,
        }
    }

    pub fn get_base_uri(&self) -> Result<String> {
        self.runtime.invoke_as(&self.identifiers.get_base_uri, &[])
    }

    pub fn get_location_href(&self) -> Result<String> {
        self.runtime.invoke_as(&self.identifiers.get_location_href, &[])
    }

    /// Ask the host to change location. The host's return value is ignored.
    pub fn navigate_to(&self, uri: &str, force_load: bool) -> Result<()> {
        tracing::trace!(
            identifier = %self.identifiers.navigate_to,
            uri = %uri,
            force_load,
            "Invoking host navigation"
        );
        self.runtime
            .invoke_void(&self.identifiers.navigate_to, &[json!(uri), json!(force_load)])
    }
}

impl<R: Clone> Clone for BrowserNavigationInterop<R> {
    fn clone(&self) -> Self {
        Self {
            runtime: self.runtime.clone(),
            identifiers: self.identifiers.clone(),
        }
    }
}
