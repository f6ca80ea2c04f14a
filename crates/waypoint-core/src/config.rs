//! Application configuration

use serde::{Deserialize, Serialize};
use waypoint_interop::{split_identifier, NavigationInterop, DEFAULT_NAMESPACE};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Dotted path of the host object exposing the navigation functions
    pub interop_namespace: String,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Config {
    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        split_identifier(&self.interop_namespace).map_err(|_| {
            CoreError::Config(format!(
                "interopNamespace '{}' is not a dotted identifier",
                self.interop_namespace
            ))
        })?;
        Ok(())
    }

    pub fn navigation_interop(&self) -> NavigationInterop {
        NavigationInterop::new(&self.interop_namespace)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interop_namespace: DEFAULT_NAMESPACE.to_string(),
            log_filter: "info".to_string(),
        }
    }
}
