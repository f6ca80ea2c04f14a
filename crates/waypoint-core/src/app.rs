//! Application context
//!
//! Owns the single navigation manager of a running application. Components
//! receive a handle from here instead of reaching for a global.

use waypoint_interop::JsRuntime;
use waypoint_navigation::BrowserNavigationManager;

use crate::config::Config;
use crate::Result;

pub struct App<R> {
    config: Config,
    navigation: BrowserNavigationManager<R>,
}

impl<R: JsRuntime> App<R> {
    pub fn new(config: Config, runtime: R) -> Result<Self> {
        config.validate()?;

        let navigation = BrowserNavigationManager::browser_with_identifiers(
            runtime,
            config.navigation_interop(),
        );

        tracing::info!(
            interop_namespace = %config.interop_namespace,
            "Application context created"
        );

        Ok(Self { config, navigation })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle to the application's navigation manager. All handles share
    /// the same state.
    pub fn navigation(&self) -> BrowserNavigationManager<R> {
        self.navigation.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use waypoint_interop::testing::ScriptedRuntime;

    #[test]
    fn test_handles_share_state() {
        let runtime = Arc::new(
            ScriptedRuntime::new()
                .respond("app.nav.getBaseURI", json!("https://app.example/"))
                .respond("app.nav.getLocationHref", json!("https://app.example/items/5")),
        );
        let config = Config {
            interop_namespace: "app.nav".to_string(),
            ..Config::default()
        };
        let app = App::new(config, Arc::clone(&runtime)).unwrap();

        let first = app.navigation();
        let second = app.navigation();

        assert_eq!(first.uri().unwrap(), "https://app.example/items/5");
        second.set_location("https://app.example/items/6", true);
        assert_eq!(first.uri().unwrap(), "https://app.example/items/6");

        assert_eq!(runtime.calls_to("app.nav.getLocationHref"), 1);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = Config {
            interop_namespace: String::new(),
            ..Config::default()
        };
        let result = App::new(config, ScriptedRuntime::new());
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_navigation_error_converts() {
        let app = App::new(Config::default(), ScriptedRuntime::new()).unwrap();
        let err: CoreError = app.navigation().navigate_to(None, false).unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "Navigation error: Navigation target URI is missing"
        );
    }
}
