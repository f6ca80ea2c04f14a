//! Location change notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationChangedEvent {
    /// Absolute URI of the new location
    pub location: String,
    /// True when the host intercepted an in-page link click instead of
    /// letting the browser perform a full navigation
    pub is_navigation_intercepted: bool,
    pub occurred_at: DateTime<Utc>,
}

impl LocationChangedEvent {
    pub fn new(location: String, is_navigation_intercepted: bool) -> Self {
        Self {
            location,
            is_navigation_intercepted,
            occurred_at: Utc::now(),
        }
    }
}

/// Handle returned when registering a location-changed handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    id: Uuid,
}

impl Subscription {
    pub(crate) fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl std::fmt::Display for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl std::str::FromStr for Subscription {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self { id: s.parse()? })
    }
}
